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
//! # Letter Context Module
//!
//! A module for managing the context of the open-letter service.

use std::time::Duration;

use tokio::sync::broadcast;

use ethers::providers::{Http, Provider};
use letter_store::SledStore;

/// LetterContext contains the service's configuration, store and shutdown signal.
#[derive(Clone)]
pub struct LetterContext {
    /// The configuration of the service.
    pub config: letter_config::OpenLetterConfig,
    /// Broadcasts a shutdown signal to all active connections.
    ///
    /// The server is responsible for gracefully shutting down active
    /// connections. When a graceful shutdown is initiated, a `()` value is
    /// sent via the broadcast::Sender. Each active connection receives it,
    /// reaches a safe terminal state, and completes the task.
    notify_shutdown: broadcast::Sender<()>,
    store: SledStore,
}

impl LetterContext {
    /// Creates a new LetterContext.
    pub fn new(
        config: letter_config::OpenLetterConfig,
        store: SledStore,
    ) -> Self {
        let (notify_shutdown, _) = broadcast::channel(2);
        Self {
            config,
            notify_shutdown,
            store,
        }
    }

    /// Returns a broadcast receiver handle for the shutdown signal.
    pub fn shutdown_signal(&self) -> Shutdown {
        Shutdown::new(self.notify_shutdown.subscribe())
    }

    /// Sends a shutdown signal to all subscribed tasks/connections.
    pub fn shutdown(&self) {
        let _ = self.notify_shutdown.send(());
    }

    /// Returns a new `Provider` for the ENS resolution endpoint.
    pub fn evm_provider(&self) -> letter_utils::Result<Provider<Http>> {
        let url = self.config.ens.provider_url()?;
        let provider = Provider::try_from(url.as_str())?
            .interval(Duration::from_millis(5u64));
        Ok(provider)
    }

    /// Returns the [Sled](https://sled.rs)-based database store
    pub fn store(&self) -> &SledStore {
        &self.store
    }
}

/// Listens for the server shutdown signal.
///
/// Shutdown is signalled using a `broadcast::Receiver`. Only a single value is
/// ever sent. Once a value has been sent via the broadcast channel, the server
/// should shutdown.
///
/// The `Shutdown` struct listens for the signal and tracks that the signal has
/// been received. Callers may query for whether the shutdown signal has been
/// received or not.
#[derive(Debug)]
pub struct Shutdown {
    /// `true` if the shutdown signal has been received
    shutdown: bool,

    /// The receive half of the channel used to listen for shutdown.
    notify: broadcast::Receiver<()>,
}

impl Shutdown {
    /// Create a new `Shutdown` backed by the given `broadcast::Receiver`.
    pub fn new(notify: broadcast::Receiver<()>) -> Shutdown {
        Shutdown {
            shutdown: false,
            notify,
        }
    }

    /// Receive the shutdown notice, waiting if necessary.
    pub async fn recv(&mut self) {
        // If the shutdown signal has already been received, then return
        // immediately.
        if self.shutdown {
            return;
        }

        // Cannot receive a "lag error" as only one value is ever sent.
        let _ = self.notify.recv().await;

        // Remember that the signal has been received.
        self.shutdown = true;
    }
}
