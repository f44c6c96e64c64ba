use std::collections::HashMap;

use ethers::types::Address;
use typed_builder::TypedBuilder;

use letter_utils::Result;

/// A name service over two fixed maps: reverse records and name ownership.
///
/// Useful in tests, and as the resolver of last resort when no RPC provider
/// is configured (it resolves nothing, so every signer falls back to their
/// raw address).
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct MockedNameService {
    /// Reverse records: address to primary name.
    #[builder(default)]
    pub names: HashMap<Address, String>,
    /// Ownership records: name to owner address.
    #[builder(default)]
    pub owners: HashMap<String, Address>,
}

#[async_trait::async_trait]
impl super::NameService for MockedNameService {
    async fn primary_name(
        &self,
        address: Address,
    ) -> Result<Option<String>> {
        Ok(self.names.get(&address).cloned())
    }

    async fn name_owner(&self, name: &str) -> Result<Option<Address>> {
        Ok(self.owners.get(name).copied())
    }
}
