#![allow(clippy::unused_async)]
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use letter_context::LetterContext;
use letter_store::{NewSigner, SignerRecord, SignerStore};
use letter_utils::HandlerError;

/// The body of a signer submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSignerRequest {
    /// The signer's wallet address.
    pub address: String,
    /// The signature over the pledge text, stored as submitted.
    pub signature: String,
    /// The ENS name the submitting client resolved, if any.
    #[serde(default)]
    pub ens: Option<String>,
}

/// Signer insertion acknowledgment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSignerResponse {
    /// The store-assigned identifier of the inserted record.
    pub inserted_id: u64,
}

/// Handles signer list requests
///
/// Returns all signer records, newest first.
///
/// # Arguments
///
/// * `ctx` - LetterContext reference that holds the store
pub async fn handle_list_signers(
    State(ctx): State<Arc<LetterContext>>,
) -> Result<Json<Vec<SignerRecord>>, HandlerError> {
    let signers = ctx.store().signers()?;
    Ok(Json(signers))
}

/// Handles a new signer submission
///
/// Inserts a record with `pinned = false` and a server-assigned `createdAt`,
/// and returns `201 Created` with the inserted identifier. The signature is
/// stored as submitted; nothing here verifies it against the pledge text.
///
/// # Arguments
///
/// * `ctx` - LetterContext reference that holds the store
/// * `payload` - The submitted address, signature and resolved name
pub async fn handle_add_signer(
    State(ctx): State<Arc<LetterContext>>,
    Json(payload): Json<AddSignerRequest>,
) -> Result<(StatusCode, Json<AddSignerResponse>), HandlerError> {
    let inserted_id = ctx.store().insert_signer(NewSigner {
        address: payload.address,
        signature: payload.signature,
        ens: payload.ens,
    })?;
    Ok((StatusCode::CREATED, Json(AddSignerResponse { inserted_id })))
}

/// Handles every other method on the signers route
///
/// Returns `405 Method Not Allowed` with an explicit `Allow` list and a
/// plain-text body naming the rejected method.
pub async fn handle_method_not_allowed(method: Method) -> impl IntoResponse {
    tracing::warn!("Rejected {} on the signers route", method);
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, POST")],
        format!("Method {method} Not Allowed"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use letter_config::OpenLetterConfig;
    use letter_store::SledStore;

    fn test_context() -> Arc<LetterContext> {
        let store = SledStore::temporary().unwrap();
        Arc::new(LetterContext::new(OpenLetterConfig::default(), store))
    }

    #[tokio::test]
    async fn add_then_list_puts_the_new_record_first() {
        let ctx = test_context();
        for (address, signature) in
            [("0xAAA", "0x111"), ("0xABC", "0xdead")]
        {
            let (status, _) = handle_add_signer(
                State(ctx.clone()),
                Json(AddSignerRequest {
                    address: address.to_string(),
                    signature: signature.to_string(),
                    ens: None,
                }),
            )
            .await
            .unwrap();
            assert_eq!(status, StatusCode::CREATED);
        }

        let Json(signers) =
            handle_list_signers(State(ctx)).await.unwrap();
        assert_eq!(signers.len(), 2);
        assert_eq!(signers[0].address, "0xABC");
        assert_eq!(signers[0].signature, "0xdead");
        assert_eq!(signers[0].ens, None);
        assert!(!signers[0].pinned);
    }

    #[tokio::test]
    async fn listing_twice_returns_identical_content() {
        let ctx = test_context();
        let _ = handle_add_signer(
            State(ctx.clone()),
            Json(AddSignerRequest {
                address: "0xAAA".to_string(),
                signature: "0x111".to_string(),
                ens: Some("someone.eth".to_string()),
            }),
        )
        .await
        .unwrap();

        let Json(first) =
            handle_list_signers(State(ctx.clone())).await.unwrap();
        let Json(second) = handle_list_signers(State(ctx)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn inserted_record_has_the_wire_shape() {
        let ctx = test_context();
        let (_, Json(ack)) = handle_add_signer(
            State(ctx.clone()),
            Json(AddSignerRequest {
                address: "0xABC".to_string(),
                signature: "0xdead".to_string(),
                ens: None,
            }),
        )
        .await
        .unwrap();

        let Json(signers) =
            handle_list_signers(State(ctx)).await.unwrap();
        let json = serde_json::to_value(&signers[0]).unwrap();
        assert_eq!(json["address"], "0xABC");
        assert_eq!(json["signature"], "0xdead");
        assert_eq!(json["ens"], serde_json::Value::Null);
        assert_eq!(json["pinned"], false);
        assert!(json["createdAt"].is_string());
        // the ack carries the generated identifier.
        let _ = ack.inserted_id;
    }

    #[tokio::test]
    async fn other_methods_are_rejected_with_allow_list() {
        let response =
            handle_method_not_allowed(Method::PUT).await.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(header::ALLOW).unwrap(),
            "GET, POST"
        );
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], b"Method PUT Not Allowed");
    }
}
