//! Story service orchestrating session context and narration turns.
//!
//! A turn is: read (or initialize) the session context, build the
//! narrator prompt, call the completion backend, extract the structured
//! turn, and only then append the exchange to the context. Any failure
//! leaves the context exactly as it was, so garbage never pollutes
//! future prompts.

use tracing::info;

use fabula_types::error::{ConfigError, StoryError};
use fabula_types::llm::{CompletionRequest, PromptTurn};
use fabula_types::story::StoryTurn;

use crate::llm::CompletionBackend;
use crate::story::extractor::extract_story_turn;
use crate::story::prompt::build_prompt;
use crate::story::store::SessionStore;

/// Sampling parameters for narration completions.
const STORY_TEMPERATURE: f64 = 0.8;
const STORY_MAX_TOKENS: u32 = 300;

/// Orchestrates story turns over a session store and completion backend.
///
/// The backend slot holds the startup configuration result: when
/// credentials were absent at startup the service still runs, and every
/// turn replays the stored [`ConfigError`] instead.
pub struct StoryService<S: SessionStore, B: CompletionBackend> {
    sessions: S,
    backend: Result<B, ConfigError>,
    model: String,
}

impl<S: SessionStore, B: CompletionBackend> StoryService<S, B> {
    /// Create a new story service.
    pub fn new(sessions: S, backend: Result<B, ConfigError>, model: String) -> Self {
        Self {
            sessions,
            backend,
            model,
        }
    }

    /// The current context for a session, initializing it if unseen.
    pub async fn context(&self, session_id: &str) -> Result<String, StoryError> {
        Ok(self.sessions.get_or_init(session_id).await?)
    }

    /// Run one narration turn.
    ///
    /// On success the session context gains one
    /// `"\nPlayer: <action>\nSystem: <text>"` exchange. On any failure
    /// the error propagates and the context is untouched; the caller
    /// decides how to mask it.
    pub async fn continue_story(
        &self,
        session_id: &str,
        player_action: &str,
    ) -> Result<StoryTurn, StoryError> {
        let backend = self
            .backend
            .as_ref()
            .map_err(|e| StoryError::Credentials(e.clone()))?;

        let context = self.sessions.get_or_init(session_id).await?;
        let request = CompletionRequest::new(
            self.model.as_str(),
            vec![PromptTurn::user(build_prompt(&context, player_action))],
            STORY_TEMPERATURE,
            STORY_MAX_TOKENS,
        );

        let response = backend.complete(&request).await?;
        let turn = extract_story_turn(&response.text)?;

        let updated = format!("{context}\nPlayer: {player_action}\nSystem: {}", turn.text);
        self.sessions.update(session_id, updated).await?;
        info!(session_id, "Story turn completed");

        Ok(turn)
    }
}
