//! Error types for the share API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that converts
//! into the JSON error envelope (`{"success": false, "error": ...}`) via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use loadout_store::StoreError;

/// Errors that can occur in the share API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The identifier was malformed, absent from the store, or expired.
    /// All three collapse to the same outward outcome.
    #[error("build not found or expired")]
    NotFound,

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Store(StoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            Self::Store(err) => {
                // Persistence failures are retryable: the caller may submit
                // again and will receive a fresh identifier.
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = serde_json::json!({
            "success": false,
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
