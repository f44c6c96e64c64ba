// Copyright 2022 Webb Technologies Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use chrono::Utc;

use super::{NewSigner, SignerRecord, SignerStore};

/// SledStore is a store that records signers in a [Sled](https://sled.rs)-based database.
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore").finish()
    }
}

impl SledStore {
    /// Create a new SledStore.
    pub fn open<P: AsRef<Path>>(path: P) -> letter_utils::Result<Self> {
        let db = sled::Config::new()
            .path(path)
            .temporary(cfg!(test))
            .mode(sled::Mode::HighThroughput)
            .open()?;
        Ok(Self { db })
    }

    /// Creates a temporary SledStore.
    pub fn temporary() -> letter_utils::Result<Self> {
        // the directory must outlive the db handle.
        let dir = tempfile::tempdir()?;
        Self::open(dir.into_path())
    }

    /// Gets the total amount of data stored on disk
    pub fn get_data_stored_size(&self) -> u64 {
        self.db.size_on_disk().unwrap_or_default()
    }
}

impl SignerStore for SledStore {
    #[tracing::instrument(skip(self, signer))]
    fn insert_signer(&self, signer: NewSigner) -> letter_utils::Result<u64> {
        let tree = self.db.open_tree("signers")?;
        let created_at = Utc::now();
        let id = self.db.generate_id()?;
        let record = SignerRecord {
            address: signer.address,
            signature: signer.signature,
            ens: signer.ens,
            pinned: false,
            created_at,
        };
        // Key is insertion-time millis followed by the generated id, both
        // big-endian, so a reverse scan yields newest-first and records
        // landing in the same millisecond keep their insertion order.
        let mut key = [0u8; 16];
        key[..8].copy_from_slice(
            &(created_at.timestamp_millis() as u64).to_be_bytes(),
        );
        key[8..].copy_from_slice(&id.to_be_bytes());
        tree.insert(key, serde_json::to_vec(&record)?)?;
        tracing::event!(
            target: letter_utils::probe::TARGET,
            tracing::Level::DEBUG,
            kind = %letter_utils::probe::Kind::SignerStore,
            inserted = id,
        );
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    fn signers(&self) -> letter_utils::Result<Vec<SignerRecord>> {
        let tree = self.db.open_tree("signers")?;
        let records = tree
            .iter()
            .rev()
            .flatten()
            .filter_map(|(_, v)| serde_json::from_slice(&v).ok())
            .collect();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_signer(address: &str, signature: &str) -> NewSigner {
        NewSigner {
            address: address.to_string(),
            signature: signature.to_string(),
            ens: None,
        }
    }

    #[test]
    fn inserted_signer_is_listed_first() {
        let store = SledStore::temporary().unwrap();
        store.insert_signer(new_signer("0xAAA", "0x111")).unwrap();
        store.insert_signer(new_signer("0xBBB", "0x222")).unwrap();
        let signers = store.signers().unwrap();
        assert_eq!(signers.len(), 2);
        assert_eq!(signers[0].address, "0xBBB");
        assert_eq!(signers[1].address, "0xAAA");
    }

    #[test]
    fn insert_assigns_pinned_false_and_created_at() {
        let store = SledStore::temporary().unwrap();
        let before = Utc::now();
        store
            .insert_signer(NewSigner {
                address: "0xABC".to_string(),
                signature: "0xdead".to_string(),
                ens: Some("someone.eth".to_string()),
            })
            .unwrap();
        let signers = store.signers().unwrap();
        assert_eq!(signers.len(), 1);
        assert!(!signers[0].pinned);
        assert!(signers[0].created_at >= before);
        assert_eq!(signers[0].ens.as_deref(), Some("someone.eth"));
    }

    #[test]
    fn repeated_signing_creates_duplicates() {
        let store = SledStore::temporary().unwrap();
        let first = store.insert_signer(new_signer("0xAAA", "0x111")).unwrap();
        let second = store.insert_signer(new_signer("0xAAA", "0x111")).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.signers().unwrap().len(), 2);
    }

    #[test]
    fn listing_is_idempotent() {
        let store = SledStore::temporary().unwrap();
        store.insert_signer(new_signer("0xAAA", "0x111")).unwrap();
        store.insert_signer(new_signer("0xBBB", "0x222")).unwrap();
        let once = store.signers().unwrap();
        let twice = store.signers().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn record_serializes_camel_case() {
        let store = SledStore::temporary().unwrap();
        store.insert_signer(new_signer("0xAAA", "0x111")).unwrap();
        let signers = store.signers().unwrap();
        let json = serde_json::to_value(&signers[0]).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("pinned").is_some());
        assert!(json.get("created_at").is_none());
    }
}
