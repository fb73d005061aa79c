//! Application error type mapping to HTTP status codes.
//!
//! Error bodies are `{ "error": message }`. The underlying cause is logged
//! server-side and never leaked to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use mentor_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat round or session operation failure.
    Chat(ChatError),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Chat(ChatError::SessionNotFound) => {
                (StatusCode::NOT_FOUND, "Session not found.")
            }
            AppError::Chat(ChatError::EmptyMessage) => {
                (StatusCode::BAD_REQUEST, "Message must not be empty.")
            }
            AppError::Chat(ChatError::Model(e)) => {
                error!(error = %e, "Model invocation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to get a response from the AI.",
                )
            }
            AppError::Chat(ChatError::Storage(e)) => {
                error!(error = %e, "Storage operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage operation failed.")
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
