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

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use super::{NewSigner, SignerRecord, SignerStore};

/// InMemoryStore is a store that records signers in memory.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    signers: Arc<RwLock<Vec<SignerRecord>>>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore").finish()
    }
}

impl SignerStore for InMemoryStore {
    #[tracing::instrument(skip(self, signer))]
    fn insert_signer(&self, signer: NewSigner) -> letter_utils::Result<u64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = SignerRecord {
            address: signer.address,
            signature: signer.signature,
            ens: signer.ens,
            pinned: false,
            created_at: Utc::now(),
        };
        self.signers.write().push(record);
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    fn signers(&self) -> letter_utils::Result<Vec<SignerRecord>> {
        let guard = self.signers.read();
        Ok(guard.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_signer(address: &str) -> NewSigner {
        NewSigner {
            address: address.to_string(),
            signature: "0xsig".to_string(),
            ens: None,
        }
    }

    #[test]
    fn newest_first() {
        let store = InMemoryStore::default();
        store.insert_signer(new_signer("0xAAA")).unwrap();
        store.insert_signer(new_signer("0xBBB")).unwrap();
        let signers = store.signers().unwrap();
        assert_eq!(signers[0].address, "0xBBB");
        assert_eq!(signers[1].address, "0xAAA");
    }

    #[test]
    fn ids_are_unique() {
        let store = InMemoryStore::default();
        let a = store.insert_signer(new_signer("0xAAA")).unwrap();
        let b = store.insert_signer(new_signer("0xAAA")).unwrap();
        assert_ne!(a, b);
    }
}
