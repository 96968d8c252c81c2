//! Error taxonomies shared across the workspace.
//!
//! One enum per concern. Nothing here is fatal to a running process;
//! the only startup-fatal path is the chat service's credential check,
//! which surfaces `ConfigError` through `anyhow` in the binary.

use thiserror::Error;

/// Missing or unusable startup configuration.
///
/// Clone so the story service can hold a startup failure and replay it
/// on every turn instead of refusing to start.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(String),
}

/// Errors from repository operations (used by trait definitions in fabula-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the completion backend.
///
/// `Endpoint` carries the provider's response body verbatim; the chat
/// service forwards it to the caller as diagnostics, the story service
/// only logs it.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion endpoint returned HTTP {status}")]
    Endpoint { status: u16, body: String },

    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("malformed completion response: {0}")]
    Deserialization(String),
}

impl LlmError {
    /// Diagnostic text suitable for a `details` field.
    pub fn details(&self) -> String {
        match self {
            LlmError::Endpoint { body, .. } => body.clone(),
            LlmError::Transport(msg) | LlmError::Deserialization(msg) => msg.clone(),
        }
    }
}

/// Failure to recover a structured record from the narrator's free text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no JSON object found")]
    NoJsonObject,

    #[error("malformed reply")]
    MalformedReply,
}

/// Errors from a chat-service operation.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Errors from a story turn. Every variant collapses to the same fixed
/// fallback record at the handler; the distinction exists for logging.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error(transparent)]
    Credentials(#[from] ConfigError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Session(#[from] RepositoryError),
}
