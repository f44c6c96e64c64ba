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

//! Letter Sign Binary.
#![deny(unsafe_code)]

use std::path::PathBuf;

use structopt::StructOpt;

use ethers::providers::Provider;
use letter_client::{
    CookieJar, HttpSignerApi, LocalWalletConnector, SessionState, SigningFlow,
};
use letter_config::cli::{load_config, setup_logger};
use letter_ens::{EnsBackend, MockedNameService, NameService};

/// The Open Letter signing tool
///
/// Signs the pledge with a local key and submits it to a running service:
///
/// $ letter-sign --api-url http://127.0.0.1:3000
#[derive(StructOpt)]
#[structopt(name = "Letter Sign")]
struct Opts {
    /// A level of verbosity, and can be used multiple times
    #[structopt(short, long, parse(from_occurrences))]
    verbose: i32,
    /// Base URL of a running open-letter service.
    #[structopt(
        long = "api-url",
        value_name = "URL",
        default_value = "http://127.0.0.1:3000"
    )]
    api_url: url::Url,
    /// Hex-encoded private key used to sign the pledge.
    #[structopt(
        long = "private-key",
        value_name = "KEY",
        env = "LETTER_PRIVATE_KEY",
        hide_env_values = true
    )]
    private_key: String,
    /// Directory that contains configration files (for the ENS provider).
    #[structopt(
        short = "c",
        long = "config-dir",
        value_name = "PATH",
        parse(from_os_str)
    )]
    config_dir: Option<PathBuf>,
}

#[paw::main]
#[tokio::main]
async fn main(args: Opts) -> anyhow::Result<()> {
    setup_logger(args.verbose, "letter_sign")?;

    let provider_url = args
        .config_dir
        .as_ref()
        .map(|dir| load_config(Some(dir)))
        .transpose()?
        .and_then(|config| config.ens.provider_url().ok());
    let names: Box<dyn NameService> = match provider_url {
        Some(url) => {
            Box::new(EnsBackend::new(Provider::try_from(url.as_str())?))
        }
        None => {
            tracing::warn!(
                "No ENS provider configured, signing without a name"
            );
            Box::new(MockedNameService::builder().build())
        }
    };

    let connector = LocalWalletConnector::from_key(&args.private_key)?;
    let api = HttpSignerApi::new(args.api_url)?;
    let mut flow =
        SigningFlow::new(connector, api, names, CookieJar::default());

    flow.connect_and_sign().await;
    match flow.session() {
        SessionState::Signed { address, signature } => {
            println!("Signed the open letter as {address}");
            println!("Signature: {signature}");
        }
        _ => anyhow::bail!("the letter was not signed"),
    }

    let signers = flow.signers().await?;
    println!(
        "{} people have signed the open letter so far",
        signers.len()
    );
    Ok(())
}
