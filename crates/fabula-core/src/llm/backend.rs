//! CompletionBackend trait definition.
//!
//! The single seam between the services and the hosted completion API.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use fabula_types::error::LlmError;
use fabula_types::llm::{CompletionRequest, CompletionResponse};

/// Trait for hosted text-completion backends.
///
/// One outbound network call per `complete` invocation; implementations
/// hold no mutable state and never retry. A failed call is terminal for
/// the request that issued it.
///
/// Implementations live in fabula-infra (e.g., `YandexGptBackend`).
pub trait CompletionBackend: Send + Sync {
    /// Human-readable backend name (e.g., "yandexgpt").
    fn name(&self) -> &str;

    /// Send a completion request and return the first alternative's text.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
