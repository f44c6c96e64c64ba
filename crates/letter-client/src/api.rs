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

use letter_store::SignerRecord;
use serde::{Deserialize, Serialize};

use letter_utils::Result;

/// The body of a signer submission: address, signature and the name the
/// client resolved for the address (resolution happens client-side, so the
/// list renders without re-resolving every signer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerSubmission {
    /// The signer's wallet address.
    pub address: String,
    /// The signature over the pledge text.
    pub signature: String,
    /// The resolved ENS name, if any.
    pub ens: Option<String>,
}

/// The signer API: list everyone who signed, and add a signature.
#[async_trait::async_trait]
pub trait SignerApi: Send + Sync {
    /// All signer records, newest first.
    async fn signers(&self) -> Result<Vec<SignerRecord>>;
    /// Record a new signature.
    async fn add_signer(&self, submission: &SignerSubmission) -> Result<()>;
}

/// A [`SignerApi`] over HTTP, talking to a running open-letter service.
#[derive(Debug, Clone)]
pub struct HttpSignerApi {
    client: reqwest::Client,
    endpoint: url::Url,
}

impl HttpSignerApi {
    /// Creates a client against the service at `base_url`.
    pub fn new(base_url: url::Url) -> Result<Self> {
        let endpoint = base_url.join("api/signers")?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }
}

#[async_trait::async_trait]
impl SignerApi for HttpSignerApi {
    async fn signers(&self) -> Result<Vec<SignerRecord>> {
        let records = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(records)
    }

    async fn add_signer(&self, submission: &SignerSubmission) -> Result<()> {
        self.client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_serializes_camel_case_with_null_ens() {
        let submission = SignerSubmission {
            address: "0xABC".to_string(),
            signature: "0xdead".to_string(),
            ens: None,
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "address": "0xABC",
                "signature": "0xdead",
                "ens": null,
            })
        );
    }

    #[test]
    fn endpoint_is_joined_from_base_url() {
        let api =
            HttpSignerApi::new("http://127.0.0.1:3000".parse().unwrap())
                .unwrap();
        assert_eq!(api.endpoint.as_str(), "http://127.0.0.1:3000/api/signers");
    }
}
