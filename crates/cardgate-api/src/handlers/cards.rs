//! POST /v1/cards and POST /v1/cards/{id}/revoke: signature-gated card operations.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use cardgate_core::card::SignedCard;
use cardgate_core::content::{CardContent, RevocationContent};
use cardgate_core::error::ResponseError;
use cardgate_core::types::CardId;
use log::{debug, error, info};

use crate::error::ApiError;
use crate::middleware::authorize;
use crate::models::AcceptedCard;
use crate::router::{AppState, SharedState};

/// Parse a request body as a signed card.
///
/// # Errors
///
/// Returns [`ResponseError::RequestBodyInvalid`] if the body is not JSON or
/// not a signed card.
pub fn parse_card(body: &[u8]) -> Result<SignedCard, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("request body rejected: {e}");
        ApiError(ResponseError::RequestBodyInvalid)
    })
}

/// Run signature validation on the blocking pool under the configured timeout.
///
/// A timeout or a failed task is reported as [`ResponseError::Internal`].
async fn validate(state: &AppState, card: SignedCard) -> Result<SignedCard, ApiError> {
    let validator = Arc::clone(&state.validator);
    let task = tokio::task::spawn_blocking(move || validator.validate(&card).map(|()| card));

    match tokio::time::timeout(state.validation_timeout, task).await {
        Ok(Ok(Ok(card))) => Ok(card),
        Ok(Ok(Err(e))) => Err(ApiError(e)),
        Ok(Err(e)) => {
            error!("validation task failed: {e}");
            Err(ApiError(ResponseError::Internal))
        }
        Err(_) => {
            error!(
                "validation exceeded {} ms",
                state.validation_timeout.as_millis()
            );
            Err(ApiError(ResponseError::Internal))
        }
    }
}

/// Handle `POST /v1/cards`: accept a card whose snapshot is well-formed and
/// carries every required signature.
///
/// # Errors
///
/// Returns `403` without a valid token, `400` with the registered code for a
/// malformed body, snapshot or signature set, and `500` if validation times out.
pub async fn create_card_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AcceptedCard>, ApiError> {
    authorize(&state, &headers)?;
    let card = parse_card(&body)?;

    let content = CardContent::from_snapshot(&card.content_snapshot).map_err(|e| {
        debug!("card content rejected: {e}");
        ApiError(ResponseError::ContentSnapshotInvalid)
    })?;

    let card = validate(&state, card).await?;
    let id = state.validator.fingerprint(&card.content_snapshot).card_id();
    info!("card {id} accepted for {} '{}'", content.identity_type, content.identity);

    Ok(Json(AcceptedCard { id, card }))
}

/// Handle `POST /v1/cards/{id}/revoke`: accept a revocation of card `id`
/// carrying every required signature.
///
/// # Errors
///
/// Returns `403` without a valid token, `400` with the registered code for a
/// malformed body or snapshot, an id mismatch or a bad signature set, and
/// `500` if validation times out.
pub async fn revoke_card_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    authorize(&state, &headers)?;
    let card = parse_card(&body)?;

    let content = RevocationContent::from_snapshot(&card.content_snapshot).map_err(|e| {
        debug!("revocation content rejected: {e}");
        ApiError(ResponseError::ContentSnapshotInvalid)
    })?;

    let target = CardId::from_hex(&id).ok();
    if target.as_ref() != Some(&content.card_id) {
        debug!("revocation for {} sent to /v1/cards/{id}", content.card_id);
        return Err(ApiError(ResponseError::CardIdMismatch));
    }

    validate(&state, card).await?;
    info!(
        "card {} revoked ({:?})",
        content.card_id, content.revocation_reason
    );

    Ok(StatusCode::NO_CONTENT)
}
