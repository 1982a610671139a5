//! Request guards: Bearer token extraction and access checks.

use axum::http::{header, HeaderMap};
use cardgate_core::error::ResponseError;
use log::debug;

use crate::auth::token_matches;
use crate::error::ApiError;
use crate::router::AppState;

/// Extract the raw token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(header: &str) -> Option<String> {
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() { None } else { Some(token.to_owned()) }
}

/// Check the request's Bearer token against the configured access token.
///
/// Passes unconditionally when no access token is configured.
///
/// # Errors
///
/// Returns [`ResponseError::Forbidden`] if the header is missing, malformed
/// or carries the wrong token.
pub fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = state.access_token_hash.as_deref() else {
        return Ok(());
    };
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer)
        .ok_or_else(|| {
            debug!("request without a usable bearer token");
            ApiError(ResponseError::Forbidden)
        })?;
    if token_matches(expected, &token) {
        Ok(())
    } else {
        debug!("request with an unknown bearer token");
        Err(ApiError(ResponseError::Forbidden))
    }
}
