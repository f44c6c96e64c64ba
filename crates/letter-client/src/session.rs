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

/// Name of the cookie holding the pledge signature.
pub const SIGNATURE_COOKIE: &str = "signature";
/// Name of the cookie holding the signer address.
pub const ADDRESS_COOKIE: &str = "address";

/// Client-held session state for the signing journey.
///
/// Any failure along the way resets back to [`SessionState::Unconnected`];
/// there is no error state, the page simply shows the sign prompt again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No wallet connected and nothing signed.
    #[default]
    Unconnected,
    /// Waiting on the wallet-connection dialog.
    Connecting,
    /// Waiting on the wallet to sign the pledge text.
    Signing,
    /// The pledge has been signed in this session.
    Signed {
        /// The signer's wallet address.
        address: String,
        /// The signature over the pledge text.
        signature: String,
    },
}

impl SessionState {
    /// Records a produced (or restored) signature.
    pub fn set_signature(&mut self, address: String, signature: String) {
        *self = SessionState::Signed { address, signature };
    }

    /// Clears the session back to the initial state.
    pub fn reset(&mut self) {
        *self = SessionState::Unconnected;
    }

    /// Whether a signature is currently held.
    pub fn is_signed(&self) -> bool {
        matches!(self, SessionState::Signed { .. })
    }

    /// The held signature, if any.
    pub fn signature(&self) -> Option<&str> {
        match self {
            SessionState::Signed { signature, .. } => Some(signature),
            _ => None,
        }
    }

    /// The held address, if any.
    pub fn address(&self) -> Option<&str> {
        match self {
            SessionState::Signed { address, .. } => Some(address),
            _ => None,
        }
    }
}

/// A plain `name=value` cookie jar, the session's persistence across page
/// loads.
///
/// Cookies carry no attributes and are never expired by the client; they
/// live until the browser (or the user) clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: Vec<(String, String)>,
}

impl CookieJar {
    /// Parses a `document.cookie`-style string (`a=1; b=2`).
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(';')
            .filter_map(|cookie| {
                let (name, value) = cookie.split_once('=')?;
                Some((name.trim().to_string(), value.trim().to_string()))
            })
            .collect();
        Self { entries }
    }

    /// The value of the named cookie, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets (or replaces) the named cookie.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => {
                self.entries.push((name.to_string(), value.to_string()))
            }
        }
    }

    /// Renders the jar back into a `a=1; b=2` string.
    pub fn to_cookie_string(&self) -> String {
        self.entries
            .iter()
            .map(|(n, v)| format!("{n}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
