//! Chat service orchestrating dialog persistence and completion calls.
//!
//! A chat turn is: persist the user message, load bounded history,
//! assemble the prompt, call the completion backend, persist and return
//! the reply. There is no transaction around the sequence; each step
//! commits on its own, and an upstream failure after the user message
//! was saved leaves that message in place.

use chrono::Utc;
use tracing::info;

use fabula_types::dialog::{Dialog, MessageRole, StoredMessage};
use fabula_types::error::ChatError;
use fabula_types::llm::{CompletionRequest, PromptTurn};

use crate::chat::repository::DialogRepository;
use crate::llm::CompletionBackend;

/// Instruction turn sent with every chat completion.
const SYSTEM_PROMPT: &str = "You are a smart and friendly assistant.";

/// Sampling parameters for chat completions.
const CHAT_TEMPERATURE: f64 = 0.7;
const CHAT_MAX_TOKENS: u32 = 800;

/// How many most-recent messages are replayed as context on each turn.
const HISTORY_LIMIT: i64 = 50;

/// Orchestrates dialog CRUD and chat turns.
///
/// Generic over `DialogRepository` and `CompletionBackend` so fabula-core
/// never depends on fabula-infra.
pub struct ChatService<R: DialogRepository, B: CompletionBackend> {
    repo: R,
    backend: B,
    model: String,
}

impl<R: DialogRepository, B: CompletionBackend> ChatService<R, B> {
    /// Create a new chat service with the given repository and backend.
    pub fn new(repo: R, backend: B, model: String) -> Self {
        Self {
            repo,
            backend,
            model,
        }
    }

    /// List all dialogs, newest first.
    pub async fn list_dialogs(&self) -> Result<Vec<Dialog>, ChatError> {
        Ok(self.repo.list_dialogs().await?)
    }

    /// Create a dialog. A missing name gets a timestamp-derived default.
    pub async fn create_dialog(&self, name: Option<String>) -> Result<Dialog, ChatError> {
        let name =
            name.unwrap_or_else(|| format!("New dialog {}", Utc::now().timestamp()));
        let dialog = self.repo.create_dialog(&name).await?;
        info!(dialog_id = dialog.id, "Dialog created");
        Ok(dialog)
    }

    /// Delete a dialog and its messages. Unknown ids succeed.
    pub async fn delete_dialog(&self, id: i64) -> Result<(), ChatError> {
        self.repo.delete_dialog(id).await?;
        Ok(())
    }

    /// Rename a dialog in place. An empty name is rejected with a
    /// validation error and nothing is mutated.
    pub async fn rename_dialog(&self, id: i64, name: &str) -> Result<(), ChatError> {
        if name.is_empty() {
            return Err(ChatError::Validation("name is required".to_string()));
        }
        self.repo.rename_dialog(id, name).await?;
        Ok(())
    }

    /// The replayed message window for a dialog, oldest first.
    pub async fn history(&self, dialog_id: i64) -> Result<Vec<StoredMessage>, ChatError> {
        Ok(self.repo.recent_history(dialog_id, HISTORY_LIMIT).await?)
    }

    /// Run one chat turn and return the assistant's reply.
    ///
    /// An empty message is rejected before anything is persisted. The
    /// completion call is a single blocking round trip with no retry; its
    /// failure propagates with the provider's diagnostics attached.
    pub async fn chat_turn(&self, dialog_id: i64, message: &str) -> Result<String, ChatError> {
        if message.is_empty() {
            return Err(ChatError::Validation("message is required".to_string()));
        }

        self.repo
            .append_message(dialog_id, MessageRole::User, message)
            .await?;
        let history = self.repo.recent_history(dialog_id, HISTORY_LIMIT).await?;

        let request = CompletionRequest::new(
            self.model.as_str(),
            vec![
                PromptTurn::system(SYSTEM_PROMPT),
                PromptTurn::user(assemble_context(&history, message)),
            ],
            CHAT_TEMPERATURE,
            CHAT_MAX_TOKENS,
        );
        let response = self.backend.complete(&request).await?;

        self.repo
            .append_message(dialog_id, MessageRole::Assistant, &response.text)
            .await?;
        info!(dialog_id, backend = self.backend.name(), "Chat turn completed");

        Ok(response.text)
    }
}

/// Flatten the replayed window into prompt text.
///
/// The window already contains the just-persisted user message; the turn
/// is still appended once more with a trailing "assistant:" cue, so the
/// latest message appears twice in the prompt.
fn assemble_context(history: &[StoredMessage], message: &str) -> String {
    let mut context = history
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");
    context.push_str(&format!("\nuser: {message}\nassistant:"));
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_types::error::{LlmError, RepositoryError};
    use fabula_types::llm::CompletionResponse;
    use std::sync::Mutex;

    /// Vec-backed repository double with AUTOINCREMENT-style ids.
    #[derive(Default)]
    struct MemRepo {
        dialogs: Mutex<Vec<Dialog>>,
        messages: Mutex<Vec<StoredMessage>>,
    }

    impl DialogRepository for MemRepo {
        async fn list_dialogs(&self) -> Result<Vec<Dialog>, RepositoryError> {
            let mut dialogs = self.dialogs.lock().unwrap().clone();
            dialogs.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(dialogs)
        }

        async fn create_dialog(&self, name: &str) -> Result<Dialog, RepositoryError> {
            let mut dialogs = self.dialogs.lock().unwrap();
            let dialog = Dialog {
                id: dialogs.len() as i64 + 1,
                name: name.to_string(),
                created: Utc::now(),
            };
            dialogs.push(dialog.clone());
            Ok(dialog)
        }

        async fn delete_dialog(&self, id: i64) -> Result<(), RepositoryError> {
            self.dialogs.lock().unwrap().retain(|d| d.id != id);
            self.messages.lock().unwrap().retain(|m| m.dialog_id != id);
            Ok(())
        }

        async fn rename_dialog(&self, id: i64, name: &str) -> Result<(), RepositoryError> {
            for dialog in self.dialogs.lock().unwrap().iter_mut() {
                if dialog.id == id {
                    dialog.name = name.to_string();
                }
            }
            Ok(())
        }

        async fn append_message(
            &self,
            dialog_id: i64,
            role: MessageRole,
            content: &str,
        ) -> Result<StoredMessage, RepositoryError> {
            let mut messages = self.messages.lock().unwrap();
            let message = StoredMessage {
                id: messages.len() as i64 + 1,
                dialog_id,
                role,
                content: content.to_string(),
                ts: Utc::now(),
            };
            messages.push(message.clone());
            Ok(message)
        }

        async fn recent_history(
            &self,
            dialog_id: i64,
            limit: i64,
        ) -> Result<Vec<StoredMessage>, RepositoryError> {
            let messages = self.messages.lock().unwrap();
            let mut recent: Vec<StoredMessage> = messages
                .iter()
                .filter(|m| m.dialog_id == dialog_id)
                .rev()
                .take(limit as usize)
                .cloned()
                .collect();
            recent.reverse();
            Ok(recent)
        }
    }

    /// Backend double returning a canned reply or a canned failure.
    struct StubBackend {
        reply: Result<String, ()>,
    }

    impl CompletionBackend for StubBackend {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match &self.reply {
                Ok(text) => Ok(CompletionResponse { text: text.clone() }),
                Err(()) => Err(LlmError::Endpoint {
                    status: 500,
                    body: "upstream down".to_string(),
                }),
            }
        }
    }

    fn service(reply: Result<String, ()>) -> ChatService<MemRepo, StubBackend> {
        ChatService::new(
            MemRepo::default(),
            StubBackend { reply },
            "yandexgpt-lite".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_dialog_default_name_has_timestamp() {
        let svc = service(Ok("hi".to_string()));
        let before = Utc::now().timestamp();
        let dialog = svc.create_dialog(None).await.unwrap();
        let after = Utc::now().timestamp();

        let suffix = dialog.name.strip_prefix("New dialog ").unwrap();
        let seconds: i64 = suffix.parse().unwrap();
        assert!(seconds >= before && seconds <= after);
    }

    #[tokio::test]
    async fn test_create_dialog_keeps_explicit_name() {
        let svc = service(Ok("hi".to_string()));
        let dialog = svc
            .create_dialog(Some("Trip planning".to_string()))
            .await
            .unwrap();
        assert_eq!(dialog.name, "Trip planning");
    }

    #[tokio::test]
    async fn test_rename_empty_rejected_and_unchanged() {
        let svc = service(Ok("hi".to_string()));
        let dialog = svc.create_dialog(Some("Before".to_string())).await.unwrap();

        let err = svc.rename_dialog(dialog.id, "").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));

        let dialogs = svc.list_dialogs().await.unwrap();
        assert_eq!(dialogs[0].name, "Before");
    }

    #[tokio::test]
    async fn test_empty_message_rejected_without_persisting() {
        let svc = service(Ok("hi".to_string()));
        let dialog = svc.create_dialog(None).await.unwrap();

        let err = svc.chat_turn(dialog.id, "").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert!(svc.history(dialog.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_turn_persists_both_sides() {
        let svc = service(Ok("The capital is Paris.".to_string()));
        let dialog = svc.create_dialog(None).await.unwrap();

        let reply = svc.chat_turn(dialog.id, "Capital of France?").await.unwrap();
        assert_eq!(reply, "The capital is Paris.");

        let history = svc.history(dialog.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].content, "Capital of France?");
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(history[1].content, "The capital is Paris.");
    }

    #[tokio::test]
    async fn test_chat_turn_upstream_failure_keeps_user_message() {
        let svc = service(Err(()));
        let dialog = svc.create_dialog(None).await.unwrap();

        let err = svc.chat_turn(dialog.id, "hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Llm(_)));

        // The user message was committed before the failed call.
        let history = svc.history(dialog.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, MessageRole::User);
    }

    #[test]
    fn test_assemble_context_repeats_latest_turn() {
        let history = vec![
            StoredMessage {
                id: 1,
                dialog_id: 1,
                role: MessageRole::User,
                content: "hi".to_string(),
                ts: Utc::now(),
            },
            StoredMessage {
                id: 2,
                dialog_id: 1,
                role: MessageRole::Assistant,
                content: "hello".to_string(),
                ts: Utc::now(),
            },
            StoredMessage {
                id: 3,
                dialog_id: 1,
                role: MessageRole::User,
                content: "how are you?".to_string(),
                ts: Utc::now(),
            },
        ];

        let context = assemble_context(&history, "how are you?");
        assert_eq!(
            context,
            "user: hi\nassistant: hello\nuser: how are you?\nuser: how are you?\nassistant:"
        );
    }
}
