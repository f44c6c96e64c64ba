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

//! # Open Letter Signing Client
//!
//! The end-to-end pledge-signing journey: connect a wallet, sign the fixed
//! pledge text, submit the signature to the signer API, and keep the session
//! alive across page loads through two plain cookies.
//!
//! Every collaborator (the wallet connector, the signer API, the name
//! service) is injected, so the whole flow runs under test without a wallet
//! or a network.

/// The signer API client.
pub mod api;
/// The session state machine and cookie jar.
pub mod session;
/// Wallet connection and message signing.
pub mod wallet;

mod flow;

pub use api::{HttpSignerApi, SignerApi, SignerSubmission};
pub use flow::SigningFlow;
pub use session::{CookieJar, SessionState};
pub use wallet::{LocalWalletConnector, WalletConnector, WalletSigner};

/// The fixed pledge text every signer signs.
pub const PLEDGE_TEXT: &str = "I support wellbeing in web3 and today sign the open letter by moments of space";
