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

use letter_ens::NameService;
use letter_store::SignerRecord;
use letter_utils::Result;

use crate::api::{SignerApi, SignerSubmission};
use crate::session::{CookieJar, SessionState, ADDRESS_COOKIE, SIGNATURE_COOKIE};
use crate::wallet::WalletConnector;
use crate::PLEDGE_TEXT;

/// Drives the end-to-end pledge-signing journey and keeps the session state
/// consistent with wallet and cookie state.
///
/// Wallet-connection and signing failures are swallowed (logged only) and
/// treated as a no-op reset: the visitor is returned to the "not yet signed"
/// view with no error surfaced.
pub struct SigningFlow<C, A, N> {
    connector: C,
    api: A,
    names: N,
    session: SessionState,
    cookies: CookieJar,
}

impl<C, A, N> SigningFlow<C, A, N>
where
    C: WalletConnector,
    A: SignerApi,
    N: NameService,
{
    /// Creates a flow with its injected collaborators and the cookies the
    /// page loaded with.
    pub fn new(connector: C, api: A, names: N, cookies: CookieJar) -> Self {
        Self {
            connector,
            api,
            names,
            session: SessionState::default(),
            cookies,
        }
    }

    /// The current session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The cookie jar, including anything the flow wrote into it.
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Restores a previous session from the `signature` and `address`
    /// cookies.
    ///
    /// Returns `true` (and transitions straight to `Signed`) when both are
    /// present; `false` with no transition otherwise. Never contacts the
    /// wallet.
    pub fn restore_session(&mut self) -> bool {
        let signature = self.cookies.get(SIGNATURE_COOKIE);
        let address = self.cookies.get(ADDRESS_COOKIE);
        match signature.zip(address) {
            Some((signature, address)) => {
                let (signature, address) =
                    (signature.to_string(), address.to_string());
                self.session.set_signature(address, signature);
                true
            }
            None => false,
        }
    }

    /// Connects a wallet, signs the pledge text, submits the signature, and
    /// persists the session into cookies.
    pub async fn connect_and_sign(&mut self) {
        self.session = SessionState::Connecting;
        let wallet = match self.connector.connect().await {
            Ok(Some(wallet)) => wallet,
            Ok(None) => {
                tracing::event!(
                    target: letter_utils::probe::TARGET,
                    tracing::Level::DEBUG,
                    kind = %letter_utils::probe::Kind::WalletConnection,
                    declined = true,
                );
                self.session.reset();
                return;
            }
            Err(e) => {
                tracing::warn!("Could not get a wallet connection: {e}");
                self.session.reset();
                return;
            }
        };
        let address = wallet.address();

        self.session = SessionState::Signing;
        let signature = match wallet.sign_message(PLEDGE_TEXT).await {
            Ok(signature) => signature,
            Err(e) => {
                tracing::warn!("Could not sign message: {e}");
                self.session.reset();
                return;
            }
        };
        tracing::event!(
            target: letter_utils::probe::TARGET,
            tracing::Level::DEBUG,
            kind = %letter_utils::probe::Kind::Signing,
            signed = true,
            address = ?address,
        );

        let address_text = format!("{address:?}");
        let signature_text = format!("0x{signature}");
        let ens = match letter_ens::resolve(&self.names, address).await {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!("ENS resolution failed for {address:?}: {e}");
                None
            }
        };
        let submission = SignerSubmission {
            address: address_text.clone(),
            signature: signature_text.clone(),
            ens,
        };
        // a failed submit is logged and otherwise ignored; the session still
        // counts as signed locally.
        if let Err(e) = self.api.add_signer(&submission).await {
            tracing::warn!("An error occurred while adding the signer: {e}");
        }

        self.session
            .set_signature(address_text.clone(), signature_text.clone());
        self.cookies.set(SIGNATURE_COOKIE, &signature_text);
        self.cookies.set(ADDRESS_COOKIE, &address_text);
    }

    /// The page-mount policy: a returning visitor with a cached wallet and
    /// no held signature is restored from cookies, or re-prompted to sign
    /// when the cookies are gone.
    pub async fn on_page_mount(&mut self) {
        if self.connector.has_cached_wallet() && !self.session.is_signed() {
            if !self.restore_session() {
                self.connect_and_sign().await;
            }
        }
    }

    /// The full signer list, for display.
    pub async fn signers(&self) -> Result<Vec<SignerRecord>> {
        self.api.signers().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::WalletSigner;
    use ethers::signers::{LocalWallet, Signer};
    use ethers::types::{Address, Signature};
    use letter_ens::MockedNameService;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const TEST_KEY: &str =
        "0000000000000000000000000000000000000000000000000000000000000001";

    fn test_wallet() -> LocalWallet {
        TEST_KEY.parse().unwrap()
    }

    /// A connector whose behavior per connect attempt is scripted up front.
    struct ScriptedConnector {
        wallet: Option<LocalWallet>,
        cached: bool,
        decline_signing: bool,
        connect_calls: Arc<AtomicUsize>,
    }

    impl ScriptedConnector {
        fn connecting(wallet: LocalWallet) -> Self {
            Self {
                wallet: Some(wallet),
                cached: false,
                decline_signing: false,
                connect_calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn declining() -> Self {
            Self {
                wallet: None,
                cached: false,
                decline_signing: false,
                connect_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait::async_trait]
    impl WalletConnector for ScriptedConnector {
        fn has_cached_wallet(&self) -> bool {
            self.cached
        }

        async fn connect(&self) -> Result<Option<Box<dyn WalletSigner>>> {
            self.connect_calls.fetch_add(1, Ordering::SeqCst);
            match &self.wallet {
                Some(wallet) => Ok(Some(Box::new(ScriptedSigner {
                    wallet: wallet.clone(),
                    decline: self.decline_signing,
                }))),
                None => Ok(None),
            }
        }
    }

    struct ScriptedSigner {
        wallet: LocalWallet,
        decline: bool,
    }

    #[async_trait::async_trait]
    impl WalletSigner for ScriptedSigner {
        fn address(&self) -> Address {
            self.wallet.address()
        }

        async fn sign_message(&self, message: &str) -> Result<Signature> {
            if self.decline {
                return Err(letter_utils::Error::WalletDeclined);
            }
            Ok(self.wallet.sign_message(message).await?)
        }
    }

    /// A signer API that records submissions instead of sending them.
    #[derive(Clone, Default)]
    struct RecordingApi {
        submissions: Arc<Mutex<Vec<SignerSubmission>>>,
    }

    #[async_trait::async_trait]
    impl SignerApi for RecordingApi {
        async fn signers(&self) -> Result<Vec<SignerRecord>> {
            Ok(vec![])
        }

        async fn add_signer(
            &self,
            submission: &SignerSubmission,
        ) -> Result<()> {
            self.submissions.lock().push(submission.clone());
            Ok(())
        }
    }

    fn names_for(wallet: &LocalWallet, name: &str) -> MockedNameService {
        MockedNameService::builder()
            .names([(wallet.address(), name.to_string())].into())
            .owners([(name.to_string(), wallet.address())].into())
            .build()
    }

    #[tokio::test]
    async fn successful_signing_submits_and_sets_cookies() {
        let wallet = test_wallet();
        let api = RecordingApi::default();
        let mut flow = SigningFlow::new(
            ScriptedConnector::connecting(wallet.clone()),
            api.clone(),
            names_for(&wallet, "signer.eth"),
            CookieJar::default(),
        );

        flow.connect_and_sign().await;

        assert!(flow.session().is_signed());
        let expected_address = format!("{:?}", wallet.address());
        assert_eq!(flow.session().address(), Some(expected_address.as_str()));

        let submissions = api.submissions.lock();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].address, expected_address);
        assert_eq!(submissions[0].ens.as_deref(), Some("signer.eth"));
        assert!(submissions[0].signature.starts_with("0x"));

        assert_eq!(
            flow.cookies().get(SIGNATURE_COOKIE),
            flow.session().signature()
        );
        assert_eq!(
            flow.cookies().get(ADDRESS_COOKIE),
            Some(expected_address.as_str())
        );
    }

    #[tokio::test]
    async fn signature_verifies_against_pledge_text() {
        let wallet = test_wallet();
        let api = RecordingApi::default();
        let mut flow = SigningFlow::new(
            ScriptedConnector::connecting(wallet.clone()),
            api.clone(),
            MockedNameService::builder().build(),
            CookieJar::default(),
        );

        flow.connect_and_sign().await;

        let submissions = api.submissions.lock();
        let hex = submissions[0].signature.trim_start_matches("0x");
        let signature: Signature = hex.parse().unwrap();
        signature.verify(PLEDGE_TEXT, wallet.address()).unwrap();
        // no name registered, so the submission carries none.
        assert_eq!(submissions[0].ens, None);
    }

    #[tokio::test]
    async fn connection_decline_resets_without_submitting() {
        let api = RecordingApi::default();
        let mut flow = SigningFlow::new(
            ScriptedConnector::declining(),
            api.clone(),
            MockedNameService::builder().build(),
            CookieJar::default(),
        );

        flow.connect_and_sign().await;

        assert_eq!(flow.session(), &SessionState::Unconnected);
        assert!(api.submissions.lock().is_empty());
        assert_eq!(flow.cookies(), &CookieJar::default());
    }

    #[tokio::test]
    async fn signing_decline_resets_without_submitting() {
        let api = RecordingApi::default();
        let mut connector = ScriptedConnector::connecting(test_wallet());
        connector.decline_signing = true;
        let mut flow = SigningFlow::new(
            connector,
            api.clone(),
            MockedNameService::builder().build(),
            CookieJar::default(),
        );

        flow.connect_and_sign().await;

        assert_eq!(flow.session(), &SessionState::Unconnected);
        assert!(api.submissions.lock().is_empty());
    }

    #[tokio::test]
    async fn restore_session_reads_cookies_without_wallet_contact() {
        let connector = ScriptedConnector::declining();
        let connect_calls = connector.connect_calls.clone();
        let mut flow = SigningFlow::new(
            connector,
            RecordingApi::default(),
            MockedNameService::builder().build(),
            CookieJar::parse("signature=0xdead; address=0xABC"),
        );

        assert!(flow.restore_session());
        assert_eq!(
            flow.session(),
            &SessionState::Signed {
                address: "0xABC".to_string(),
                signature: "0xdead".to_string(),
            }
        );
        assert_eq!(connect_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn restore_session_needs_both_cookies() {
        let mut flow = SigningFlow::new(
            ScriptedConnector::declining(),
            RecordingApi::default(),
            MockedNameService::builder().build(),
            CookieJar::parse("signature=0xdead"),
        );

        assert!(!flow.restore_session());
        assert_eq!(flow.session(), &SessionState::Unconnected);
    }

    #[tokio::test]
    async fn mount_restores_from_cookies_when_wallet_is_cached() {
        let mut connector = ScriptedConnector::connecting(test_wallet());
        connector.cached = true;
        let connect_calls = connector.connect_calls.clone();
        let mut flow = SigningFlow::new(
            connector,
            RecordingApi::default(),
            MockedNameService::builder().build(),
            CookieJar::parse("signature=0xdead; address=0xABC"),
        );

        flow.on_page_mount().await;

        assert!(flow.session().is_signed());
        assert_eq!(connect_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn mount_re_prompts_when_cookies_are_gone() {
        let wallet = test_wallet();
        let api = RecordingApi::default();
        let mut connector = ScriptedConnector::connecting(wallet);
        connector.cached = true;
        let connect_calls = connector.connect_calls.clone();
        let mut flow = SigningFlow::new(
            connector,
            api.clone(),
            MockedNameService::builder().build(),
            CookieJar::default(),
        );

        flow.on_page_mount().await;

        assert!(flow.session().is_signed());
        assert_eq!(connect_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.submissions.lock().len(), 1);
    }

    #[tokio::test]
    async fn mount_does_nothing_without_a_cached_wallet() {
        let connector = ScriptedConnector::connecting(test_wallet());
        let connect_calls = connector.connect_calls.clone();
        let mut flow = SigningFlow::new(
            connector,
            RecordingApi::default(),
            MockedNameService::builder().build(),
            CookieJar::default(),
        );

        flow.on_page_mount().await;

        assert_eq!(flow.session(), &SessionState::Unconnected);
        assert_eq!(connect_calls.load(Ordering::SeqCst), 0);
    }
}
