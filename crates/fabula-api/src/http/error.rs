//! Application error type mapping to HTTP status codes and JSON bodies.
//!
//! The chat surface uses flat bodies: `{"error": ...}` for client
//! errors and `{"error": ..., "details": ...}` for upstream failures,
//! where `details` carries the provider's diagnostic text verbatim.
//! The story surface never goes through this type -- its handler masks
//! every failure behind the fixed fallback record.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use fabula_types::error::{ChatError, LlmError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Invalid client input; nothing was mutated.
    Validation(String),
    /// The completion call failed; diagnostics are forwarded.
    Upstream(LlmError),
    /// Storage or other internal failure.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Validation(msg) => AppError::Validation(msg),
            ChatError::Llm(err) => AppError::Upstream(err),
            ChatError::Repository(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            AppError::Upstream(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "completion request failed",
                    "details": err.details(),
                }),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": msg})),
        };

        (status, Json(body)).into_response()
    }
}
