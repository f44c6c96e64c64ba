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

//! # Open Letter Service Module
//!
//! Routing (endpoint queries / requests mapped to handler code) for the
//! signer API.

use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;

use letter_context::LetterContext;
use letter_handlers::{
    handle_add_signer, handle_list_signers, handle_method_not_allowed,
};

/// Sets up the HTTP server for the open letter and serves it until the
/// context's shutdown signal fires.
///
/// Returns `Ok(())` when the server shuts down gracefully.
///
/// # Arguments
///
/// * `ctx` - LetterContext that holds the configuration and the store
pub async fn build_web_services(ctx: LetterContext) -> crate::Result<()> {
    let app = Router::new()
        .route(
            "/api/signers",
            get(handle_list_signers)
                .post(handle_add_signer)
                .fallback(handle_method_not_allowed),
        )
        .with_state(Arc::new(ctx.clone()));

    let socket_addr =
        SocketAddr::new("0.0.0.0".parse().unwrap(), ctx.config.port);
    let mut shutdown_signal = ctx.shutdown_signal();
    tracing::info!("Starting the server on {}", socket_addr);
    axum::Server::try_bind(&socket_addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_signal.recv().await;
        })
        .await?;
    Ok(())
}
