//! Error types for the webhook surface.
//!
//! Per-request errors are isolated to the request that hit them; they never
//! take down the process or the other routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use alertlink_chat::ChatError;

/// Result type alias for gateway handlers.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while handling a webhook request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// POST body did not parse as an alert batch.
    #[error("invalid alert payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Join or send against the chat provider failed.
    #[error("chat delivery failed: {0}")]
    Delivery(#[from] ChatError),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Self::Payload(_) => (StatusCode::BAD_REQUEST, "invalid_payload"),
            // From the webhook caller's point of view the provider is the
            // upstream that failed; retrying is the alert source's job.
            Self::Delivery(_) => (StatusCode::BAD_GATEWAY, "delivery_failed"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
