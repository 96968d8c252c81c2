//! Yandex foundation-models completion API types.
//!
//! These are provider-specific request/response structures used for HTTP
//! communication with the completion endpoint. They are NOT the generic
//! completion types from fabula-types -- those are provider-agnostic.
//! The endpoint uses camelCase field names (`modelUri`, `maxTokens`).

use serde::{Deserialize, Serialize};

/// Request body for the completion endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexCompletionRequest {
    /// Folder-scoped model reference, e.g. `gpt://{folder}/yandexgpt-lite`.
    pub model_uri: String,
    pub completion_options: YandexCompletionOptions,
    pub messages: Vec<YandexMessage>,
}

/// Sampling options carried with every request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexCompletionOptions {
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// One role-tagged turn on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YandexMessage {
    pub role: String,
    pub text: String,
}

/// Response body from the completion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct YandexCompletionResponse {
    pub result: YandexResult,
}

/// The `result` object wrapping generated alternatives.
#[derive(Debug, Clone, Deserialize)]
pub struct YandexResult {
    pub alternatives: Vec<YandexAlternative>,
}

/// One generated alternative; only the first is ever consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct YandexAlternative {
    pub message: YandexMessage,
}
