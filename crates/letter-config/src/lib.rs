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

//! # Open Letter Configuration Module
//!
//! A module for configuring the open-letter service.
//!
//! ## Overview
//!
//! Possible configuration include:
//! * `port`: The port the service will listen on. Defaults to 3000.
//! * `ens`: The RPC provider used for ENS name resolution; either an
//!   `api-key` for the default mainnet endpoint or a full `http-endpoint`.
//!
//! Values can be read from the environment with the `$VAR` syntax, and the
//! whole config can be overridden with `LETTER_`-prefixed env variables.

/// CLI configuration
#[cfg(feature = "cli")]
pub mod cli;
/// Utils for processing configuration
pub mod utils;

use letter_types::{RpcApiKey, RpcUrl};
use serde::{Deserialize, Serialize};

/// The default port the service will listen on. Defaults to 3000.
const fn default_port() -> u16 {
    3000
}

/// The default mainnet RPC endpoint, completed with the configured api key.
const MAINNET_ENDPOINT_BASE: &str = "https://mainnet.infura.io/v3/";

/// OpenLetterConfig is the configuration for the open-letter service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OpenLetterConfig {
    /// HTTP Server Port number
    ///
    /// default to 3000
    #[serde(default = "default_port", skip_serializing)]
    pub port: u16,
    /// The RPC provider used for ENS name resolution.
    #[serde(default)]
    pub ens: EnsConfig,
}

/// EnsConfig is the configuration of the RPC provider backing ENS lookups.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct EnsConfig {
    /// RPC provider access key, used to build the default mainnet endpoint.
    ///
    /// A wrapper type around the `String` to allow reading it from the env.
    #[serde(default, skip_serializing)]
    pub api_key: Option<RpcApiKey>,
    /// Overrides the provider endpoint entirely. Takes precedence over
    /// `api-key`.
    #[serde(default)]
    pub http_endpoint: Option<RpcUrl>,
}

impl EnsConfig {
    /// The endpoint name resolution queries go to.
    ///
    /// Errors with [`letter_utils::Error::MissingSecrets`] when neither an
    /// endpoint nor an api key is configured.
    pub fn provider_url(&self) -> letter_utils::Result<url::Url> {
        if let Some(endpoint) = &self.http_endpoint {
            return Ok(endpoint.as_url().clone());
        }
        match &self.api_key {
            Some(key) => {
                let url = format!("{MAINNET_ENDPOINT_BASE}{}", &**key);
                Ok(url::Url::parse(&url)?)
            }
            None => Err(letter_utils::Error::MissingSecrets),
        }
    }
}
