//! HTTP rendering of registered errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cardgate_core::error::{ErrorClass, ResponseError};

/// A [`ResponseError`] on its way out as an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError(pub ResponseError);

impl ApiError {
    /// HTTP status for the wrapped error's class.
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self.0.class() {
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorClass::Forbidden => StatusCode::FORBIDDEN,
            ErrorClass::InputMalformed | ErrorClass::SignatureInvalid => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ResponseError> for ApiError {
    fn from(e: ResponseError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.0.body())).into_response()
    }
}
