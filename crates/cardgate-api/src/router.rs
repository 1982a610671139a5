//! Axum router construction.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use cardgate_crypto::validator::CardValidator;

use crate::auth::hash_secret;
use crate::handlers::cards::{create_card_handler, revoke_card_handler};
use crate::models::HealthResponse;

/// Shared server state.
pub struct AppState {
    /// Validator bound to the trust policy loaded at startup.
    pub validator: Arc<dyn CardValidator>,
    /// SHA-256 hex of the access token, if `/v1` routes are protected.
    pub access_token_hash: Option<String>,
    /// Time budget for validating one card.
    pub validation_timeout: Duration,
}

impl AppState {
    /// Build state, hashing the access token if one is given.
    pub fn new(
        validator: Arc<dyn CardValidator>,
        access_token: Option<&str>,
        validation_timeout: Duration,
    ) -> Self {
        Self {
            validator,
            access_token_hash: access_token.map(hash_secret),
            validation_timeout,
        }
    }
}

/// State as seen by handlers.
pub type SharedState = Arc<AppState>;

/// Build the Axum application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/v1/cards", post(create_card_handler))
        .route("/v1/cards/{id}/revoke", post(revoke_card_handler))
        .with_state(Arc::new(state))
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        required_signers: state.validator.required_signers(),
    })
}
