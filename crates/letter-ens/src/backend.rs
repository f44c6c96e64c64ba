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

use ethers::providers::{ens, Http, Middleware, Provider, ProviderError};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest};

use letter_utils::Result;

/// `owner(bytes32)` on the ENS registry.
const OWNER_SELECTOR: [u8; 4] = [0x02, 0x57, 0x1b, 0xe3];

/// A [`super::NameService`] backed by an Ethereum JSON-RPC provider.
///
/// Reverse lookups go through the provider's ENS support; ownership queries
/// are a registry `owner(bytes32)` call on the namehash of the name.
#[derive(Debug, Clone)]
pub struct EnsBackend {
    provider: Provider<Http>,
}

impl EnsBackend {
    /// Creates a new backend over the given provider.
    pub fn new(provider: Provider<Http>) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl super::NameService for EnsBackend {
    async fn primary_name(
        &self,
        address: Address,
    ) -> Result<Option<String>> {
        match self.provider.lookup_address(address).await {
            Ok(name) => Ok(Some(name)),
            // no reverse record, or a reverse record whose forward
            // resolution does not point back at the address.
            Err(ProviderError::EnsError(e)) => {
                tracing::trace!("No primary name for {address}: {e}");
                Ok(None)
            }
            Err(ProviderError::EnsNotOwned(e)) => {
                tracing::trace!("Reverse record not owned by {address}: {e}");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn name_owner(&self, name: &str) -> Result<Option<Address>> {
        let node = ens::namehash(name);
        let mut data = Vec::with_capacity(36);
        data.extend_from_slice(&OWNER_SELECTOR);
        data.extend_from_slice(node.as_bytes());
        let call = TransactionRequest::new()
            .to(ens::ENS_ADDRESS)
            .data(Bytes::from(data));
        let tx: TypedTransaction = call.into();
        let raw = self.provider.call(&tx, None).await?;
        if raw.len() < 32 {
            return Ok(None);
        }
        let owner = Address::from_slice(&raw[12..32]);
        if owner.is_zero() {
            Ok(None)
        } else {
            Ok(Some(owner))
        }
    }
}
