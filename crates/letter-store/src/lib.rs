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

//! # Signer Store Module
//!
//! Persistence for the list of open-letter signers.
//!
//! ## Overview
//!
//! The store holds one record per signature. Records are written once and
//! never updated or deleted; the only read is "all signers, newest first".
//! Repeated signing from the same address creates duplicate records on
//! purpose, the letter counts signatures, not people.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use letter_utils::Result;

/// A module for managing in-memory storage of signers.
pub mod mem;
/// A module for setting up and managing a [Sled](https://sled.rs)-based database.
pub mod sled;

/// A store that uses [`sled`](https://sled.rs) as the backend.
pub use self::sled::SledStore;
/// A store that uses in memory data structures as the backend.
pub use mem::InMemoryStore;

/// A single recorded signature of the open letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerRecord {
    /// The wallet address, as submitted by the signer.
    pub address: String,
    /// The signature over the pledge text, as submitted by the signer.
    pub signature: String,
    /// The ENS name the signer resolved for their address, if any.
    pub ens: Option<String>,
    /// Whether this signer is featured on the page. Set out-of-band, never
    /// through the API.
    pub pinned: bool,
    /// Server-assigned insertion time.
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied part of a [`SignerRecord`].
///
/// `pinned` and `created_at` are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSigner {
    /// The wallet address.
    pub address: String,
    /// The signature over the pledge text.
    pub signature: String,
    /// The ENS name resolved for the address, if any.
    pub ens: Option<String>,
}

/// SignerStore is a simple trait for inserting and listing signer records.
pub trait SignerStore: Clone + Send + Sync {
    /// Insert a new signer record with `pinned = false` and a server-assigned
    /// `created_at`, and return the store-assigned identifier.
    fn insert_signer(&self, signer: NewSigner) -> Result<u64>;

    /// All signer records ordered by `created_at` descending (newest first).
    fn signers(&self) -> Result<Vec<SignerRecord>>;
}
