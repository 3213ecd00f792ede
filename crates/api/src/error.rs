use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use deliverus_core::error::CoreError;
use deliverus_core::product::violation::ValidationFailure;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `deliverus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request failed one or more product rules.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            // Every collected violation is returned, one entry per field rule.
            AppError::Validation(failure) => {
                let body = json!({
                    "errors": failure.errors,
                    "code": "VALIDATION_ERROR",
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }

            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }

            AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Rejected malformed request");
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
