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

#![warn(missing_docs)]

//! ENS Name Resolution
//!
//! Resolves a wallet address to its registered primary name, and only trusts
//! the name after checking that its recorded owner is the queried address.
//! Without that second check anyone could point their reverse record at a
//! name they do not own and have it displayed next to their signature.
//!
//! ## Usage
//! ```rust,ignore
//! use letter_ens::{resolve, EnsBackend};
//! let backend = EnsBackend::new(provider);
//! let name = resolve(&backend, address).await?;
//! ```

use ethers::types::Address;
use letter_utils::Result;

/// Provider-backed name service.
mod backend;
/// A mocked name service, for tests and provider-less setups.
mod mocked;

pub use backend::EnsBackend;
pub use mocked::MockedNameService;

/// A name registry that can answer reverse lookups and ownership queries.
#[async_trait::async_trait]
pub trait NameService: Send + Sync {
    /// The primary (reverse-record) name registered for the address, if any.
    async fn primary_name(&self, address: Address)
        -> Result<Option<String>>;
    /// The recorded owner of the given name, if the name exists.
    async fn name_owner(&self, name: &str) -> Result<Option<Address>>;
}

#[async_trait::async_trait]
impl NameService for Box<dyn NameService> {
    async fn primary_name(
        &self,
        address: Address,
    ) -> Result<Option<String>> {
        (**self).primary_name(address).await
    }

    async fn name_owner(&self, name: &str) -> Result<Option<Address>> {
        (**self).name_owner(name).await
    }
}

/// Resolves the display name for `address`.
///
/// Returns the registered primary name only when the name's recorded owner
/// is exactly the queried address; otherwise `None`. Callers fall back to
/// displaying the raw address.
pub async fn resolve<S>(
    names: &S,
    address: Address,
) -> Result<Option<String>>
where
    S: NameService + ?Sized,
{
    let name = match names.primary_name(address).await? {
        Some(name) => name,
        None => return Ok(None),
    };

    // double check
    let owner = names.name_owner(&name).await?;

    if owner == Some(address) {
        Ok(Some(name))
    } else {
        tracing::event!(
            target: letter_utils::probe::TARGET,
            tracing::Level::DEBUG,
            kind = %letter_utils::probe::Kind::EnsLookup,
            rejected_name = %name,
            %address,
        );
        Ok(None)
    }
}
