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

use std::sync::atomic::{AtomicBool, Ordering};

use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, Signature};

use letter_utils::Result;

/// A connected wallet: an address and the ability to sign messages with it.
#[async_trait::async_trait]
pub trait WalletSigner: Send + Sync {
    /// The wallet's account address.
    fn address(&self) -> Address;
    /// Sign the given message with the wallet's key.
    async fn sign_message(&self, message: &str) -> Result<Signature>;
}

/// Connects wallets on request and remembers that it has done so.
///
/// This is explicit, injected state rather than a module-scoped singleton,
/// so the signing flow stays testable.
#[async_trait::async_trait]
pub trait WalletConnector: Send + Sync {
    /// Whether a wallet from a previous connection is cached.
    ///
    /// A returning visitor with a cached wallet is re-prompted to sign
    /// without an explicit click.
    fn has_cached_wallet(&self) -> bool;

    /// Ask for a wallet connection. `Ok(None)` means the user declined.
    async fn connect(&self) -> Result<Option<Box<dyn WalletSigner>>>;
}

/// A [`WalletConnector`] over a local private key.
pub struct LocalWalletConnector {
    wallet: LocalWallet,
    cached: AtomicBool,
}

impl LocalWalletConnector {
    /// Creates a connector over an existing wallet.
    pub fn new(wallet: LocalWallet) -> Self {
        Self {
            wallet,
            cached: AtomicBool::new(false),
        }
    }

    /// Creates a connector from a hex-encoded private key.
    pub fn from_key(private_key: &str) -> Result<Self> {
        let wallet: LocalWallet = private_key.parse()?;
        Ok(Self::new(wallet))
    }
}

#[async_trait::async_trait]
impl WalletConnector for LocalWalletConnector {
    fn has_cached_wallet(&self) -> bool {
        self.cached.load(Ordering::Relaxed)
    }

    async fn connect(&self) -> Result<Option<Box<dyn WalletSigner>>> {
        self.cached.store(true, Ordering::Relaxed);
        Ok(Some(Box::new(LocalWalletSigner {
            wallet: self.wallet.clone(),
        })))
    }
}

struct LocalWalletSigner {
    wallet: LocalWallet,
}

#[async_trait::async_trait]
impl WalletSigner for LocalWalletSigner {
    fn address(&self) -> Address {
        self.wallet.address()
    }

    async fn sign_message(&self, message: &str) -> Result<Signature> {
        Ok(self.wallet.sign_message(message).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str =
        "0000000000000000000000000000000000000000000000000000000000000001";

    #[tokio::test]
    async fn local_connector_signs_verifiably() {
        let connector = LocalWalletConnector::from_key(TEST_KEY).unwrap();
        let wallet = connector.connect().await.unwrap().unwrap();
        let signature = wallet.sign_message(crate::PLEDGE_TEXT).await.unwrap();
        signature
            .verify(crate::PLEDGE_TEXT, wallet.address())
            .unwrap();
    }

    #[tokio::test]
    async fn connector_caches_after_first_connection() {
        let connector = LocalWalletConnector::from_key(TEST_KEY).unwrap();
        assert!(!connector.has_cached_wallet());
        let _ = connector.connect().await.unwrap();
        assert!(connector.has_cached_wallet());
    }

    #[test]
    fn bad_key_is_rejected() {
        assert!(LocalWalletConnector::from_key("not a key").is_err());
    }
}
