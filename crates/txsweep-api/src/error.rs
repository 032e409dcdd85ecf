//! Error types for txsweep-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// API error type
///
/// Messages stay generic on purpose; the real failure kind is logged at
/// the handler and never leaked to the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to deduplicate transactions")]
    DedupFailed,

    #[error("Failed to reload transactions")]
    ReloadFailed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "success": false,
            "message": self.to_string(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
