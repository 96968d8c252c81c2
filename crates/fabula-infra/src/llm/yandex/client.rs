//! YandexGptBackend -- concrete [`CompletionBackend`] for the Yandex
//! foundation-models completion endpoint.
//!
//! Sends one POST per `complete` call with `Api-Key` authentication and
//! returns the first alternative's text. No retries, no streaming, no
//! request timeout beyond the client default.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

use secrecy::{ExposeSecret, SecretString};

use fabula_core::llm::CompletionBackend;
use fabula_types::error::LlmError;
use fabula_types::llm::{CompletionRequest, CompletionResponse};

use crate::config::ProviderConfig;

use super::types::{
    YandexCompletionOptions, YandexCompletionRequest, YandexCompletionResponse, YandexMessage,
};

/// Completion backend for YandexGPT.
// Intentionally no Debug derive: the SecretString field already guards
// the key, and omitting Debug keeps the whole struct out of logs.
pub struct YandexGptBackend {
    client: reqwest::Client,
    api_key: SecretString,
    folder_id: String,
    base_url: String,
}

impl YandexGptBackend {
    /// Path of the completion endpoint under the base URL.
    const COMPLETION_PATH: &'static str = "/foundationModels/v1/completion";

    /// Create a new backend from provider credentials.
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key,
            folder_id: config.folder_id,
            base_url: "https://llm.api.cloud.yandex.net".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Folder-scoped model reference for this account.
    fn model_uri(&self, model: &str) -> String {
        format!("gpt://{}/{}", self.folder_id, model)
    }

    /// Convert a generic [`CompletionRequest`] into the wire format.
    fn to_wire_request(&self, request: &CompletionRequest) -> YandexCompletionRequest {
        let messages = request
            .turns
            .iter()
            .map(|turn| YandexMessage {
                role: turn.role.to_string(),
                text: turn.text.clone(),
            })
            .collect();

        YandexCompletionRequest {
            model_uri: self.model_uri(&request.model),
            completion_options: YandexCompletionOptions {
                stream: request.stream,
                temperature: request.temperature,
                max_tokens: request.max_tokens,
            },
            messages,
        }
    }
}

impl CompletionBackend for YandexGptBackend {
    fn name(&self) -> &str {
        "yandexgpt"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_wire_request(request);
        let url = self.url(Self::COMPLETION_PATH);
        tracing::debug!(model_uri = %body.model_uri, "sending completion request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Api-Key {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(LlmError::Endpoint {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let wire_resp: YandexCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let first = wire_resp
            .result
            .alternatives
            .into_iter()
            .next()
            .ok_or_else(|| {
                LlmError::Deserialization("response contained no alternatives".to_string())
            })?;

        Ok(CompletionResponse {
            text: first.message.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_types::llm::PromptTurn;

    fn make_backend() -> YandexGptBackend {
        YandexGptBackend::new(ProviderConfig {
            api_key: SecretString::from("test-key-not-real"),
            folder_id: "folder-abc".to_string(),
        })
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(make_backend().name(), "yandexgpt");
    }

    #[test]
    fn test_model_uri_includes_folder() {
        let backend = make_backend();
        assert_eq!(
            backend.model_uri("yandexgpt-lite"),
            "gpt://folder-abc/yandexgpt-lite"
        );
    }

    #[test]
    fn test_to_wire_request() {
        let backend = make_backend();
        let request = CompletionRequest::new(
            "yandexgpt-lite",
            vec![
                PromptTurn::system("Be helpful"),
                PromptTurn::user("Hello"),
            ],
            0.7,
            800,
        );

        let wire = backend.to_wire_request(&request);
        assert_eq!(wire.model_uri, "gpt://folder-abc/yandexgpt-lite");
        assert!(!wire.completion_options.stream);
        assert_eq!(wire.completion_options.max_tokens, 800);
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.messages[1].text, "Hello");
    }

    #[test]
    fn test_base_url_override() {
        let backend = make_backend().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            backend.url(YandexGptBackend::COMPLETION_PATH),
            "http://localhost:8080/foundationModels/v1/completion"
        );
    }
}
