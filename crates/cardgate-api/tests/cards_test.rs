mod common;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use cardgate_api::router::{build_router, AppState};
use cardgate_core::card::{ContentSnapshot, SignedCard};
use cardgate_core::error::{ErrorBody, ResponseError};
use cardgate_crypto::provider::Fingerprint;
use cardgate_crypto::validator::{CardValidator, ValidationOutcome};
use common::{card_snapshot, fully_signed, revocation_snapshot, server, signed, TOKEN};
use serde_json::Value;

fn assert_error(response: &axum_test::TestResponse, status: StatusCode, expected: ResponseError) {
    assert_eq!(response.status_code(), status);
    let body: ErrorBody = response.json();
    assert_eq!(body.code, expected.code());
    assert_eq!(body.message, expected.message());
}

#[tokio::test]
async fn fully_signed_card_is_accepted_with_its_id() {
    let server = server(None);
    let card = fully_signed(card_snapshot("alice@example.com"));
    let expected_id = Fingerprint::sha256(card.content_snapshot.as_bytes()).to_hex();

    let response = server.post("/v1/cards").json(&card).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["id"], expected_id);
    assert_eq!(body["content_snapshot"], serde_json::to_value(&card.content_snapshot).unwrap());
    assert!(body["meta"]["signs"]["self"].is_string());
}

#[tokio::test]
async fn missing_required_signature_is_rejected() {
    let server = server(None);
    let card = signed(card_snapshot("alice@example.com"), &[("self", 1)]);
    let response = server.post("/v1/cards").json(&card).await;
    assert_error(&response, StatusCode::BAD_REQUEST, ResponseError::SignatureValidationFailed);
}

#[tokio::test]
async fn signature_from_the_wrong_key_is_rejected() {
    let server = server(None);
    let card = signed(card_snapshot("alice@example.com"), &[("self", 1), ("app", 9)]);
    let response = server.post("/v1/cards").json(&card).await;
    assert_error(&response, StatusCode::BAD_REQUEST, ResponseError::SignatureValidationFailed);
}

#[tokio::test]
async fn garbage_signature_is_rejected() {
    let server = server(None);
    let mut card = signed(card_snapshot("alice@example.com"), &[("self", 1)]);
    card.meta.signs.insert("app", vec![0xde, 0xad]);
    let response = server.post("/v1/cards").json(&card).await;
    assert_error(&response, StatusCode::BAD_REQUEST, ResponseError::SignatureValidationFailed);
}

#[tokio::test]
async fn surplus_signature_is_tolerated() {
    let server = server(None);
    let card = signed(
        card_snapshot("alice@example.com"),
        &[("self", 1), ("app", 2), ("observer", 5)],
    );
    server.post("/v1/cards").json(&card).await.assert_status_ok();
}

#[tokio::test]
async fn non_json_body_is_request_body_invalid() {
    let server = server(None);
    let response = server.post("/v1/cards").text("not a card").await;
    assert_error(&response, StatusCode::BAD_REQUEST, ResponseError::RequestBodyInvalid);
}

#[tokio::test]
async fn snapshot_that_is_not_a_card_is_content_invalid() {
    let server = server(None);
    let card = fully_signed(b"{\"hello\":\"world\"}".to_vec());
    let response = server.post("/v1/cards").json(&card).await;
    assert_error(&response, StatusCode::BAD_REQUEST, ResponseError::ContentSnapshotInvalid);
}

#[tokio::test]
async fn token_is_enforced_when_configured() {
    let server = server(Some(TOKEN));
    let card = fully_signed(card_snapshot("alice@example.com"));

    let response = server.post("/v1/cards").json(&card).await;
    assert_error(&response, StatusCode::FORBIDDEN, ResponseError::Forbidden);

    let response = server
        .post("/v1/cards")
        .authorization_bearer("wrong")
        .json(&card)
        .await;
    assert_error(&response, StatusCode::FORBIDDEN, ResponseError::Forbidden);

    server
        .post("/v1/cards")
        .authorization_bearer(TOKEN)
        .json(&card)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn revocation_of_matching_card_returns_204() {
    let server = server(None);
    let card = fully_signed(card_snapshot("alice@example.com"));
    let id = Fingerprint::sha256(card.content_snapshot.as_bytes()).to_hex();
    let revocation = fully_signed(revocation_snapshot(&id));

    let response = server
        .post(&format!("/v1/cards/{id}/revoke"))
        .json(&revocation)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn revocation_for_another_card_is_a_mismatch() {
    let server = server(None);
    let revocation = fully_signed(revocation_snapshot(&"a".repeat(64)));

    let response = server
        .post(&format!("/v1/cards/{}/revoke", "b".repeat(64)))
        .json(&revocation)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, ResponseError::CardIdMismatch);

    let response = server.post("/v1/cards/not-hex/revoke").json(&revocation).await;
    assert_error(&response, StatusCode::BAD_REQUEST, ResponseError::CardIdMismatch);
}

#[tokio::test]
async fn unsigned_revocation_is_rejected() {
    let server = server(None);
    let id = "c".repeat(64);
    let revocation = SignedCard::unsigned(revocation_snapshot(&id));
    let response = server
        .post(&format!("/v1/cards/{id}/revoke"))
        .json(&revocation)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, ResponseError::SignatureValidationFailed);
}

struct SlowValidator;

impl CardValidator for SlowValidator {
    fn validate(&self, _card: &SignedCard) -> ValidationOutcome {
        thread::sleep(Duration::from_millis(300));
        Ok(())
    }

    fn fingerprint(&self, snapshot: &ContentSnapshot) -> Fingerprint {
        Fingerprint::sha256(snapshot.as_bytes())
    }

    fn required_signers(&self) -> usize {
        0
    }
}

#[tokio::test]
async fn validation_timeout_is_an_internal_error() {
    let state = AppState::new(Arc::new(SlowValidator), None, Duration::from_millis(20));
    let server = TestServer::new(build_router(state)).unwrap();
    let card = SignedCard::unsigned(card_snapshot("alice@example.com"));

    let response = server.post("/v1/cards").json(&card).await;
    assert_error(&response, StatusCode::INTERNAL_SERVER_ERROR, ResponseError::Internal);
}
