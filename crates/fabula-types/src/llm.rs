//! Provider-agnostic completion types.
//!
//! These model what the services need from a hosted text-completion API:
//! an ordered list of role-tagged turns in, the first alternative's text
//! out. Provider wire formats live in `fabula-infra`, not here.

use serde::{Deserialize, Serialize};

use crate::dialog::MessageRole;

/// A single role-tagged turn of prompt text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTurn {
    pub role: MessageRole,
    pub text: String,
}

impl PromptTurn {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
        }
    }
}

/// Request for one completion call.
///
/// `stream` is carried on the wire but always false: neither service
/// consumes streamed output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub turns: Vec<PromptTurn>,
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(default)]
    pub stream: bool,
}

impl CompletionRequest {
    /// Build a non-streaming request.
    pub fn new(model: impl Into<String>, turns: Vec<PromptTurn>, temperature: f64, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            turns,
            temperature,
            max_tokens,
            stream: false,
        }
    }
}

/// The generated text of the first alternative.
///
/// Providers may return several alternatives; only the first is ever used,
/// so the response collapses to a single string at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
}
