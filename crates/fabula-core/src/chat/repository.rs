//! DialogRepository trait definition.
//!
//! Persistence operations for dialogs and their messages. Each operation
//! is a single independently committed statement; no transaction spans
//! two of them. Uses native async fn in traits (RPITIT, Rust 2024
//! edition).

use fabula_types::dialog::{Dialog, MessageRole, StoredMessage};
use fabula_types::error::RepositoryError;

/// Repository trait for dialog and message persistence.
///
/// Implementations live in fabula-infra (e.g., `SqliteDialogRepository`).
pub trait DialogRepository: Send + Sync {
    /// List all dialogs, most recently created first.
    fn list_dialogs(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Dialog>, RepositoryError>> + Send;

    /// Insert a dialog with the given name and the current timestamp.
    fn create_dialog(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Dialog, RepositoryError>> + Send;

    /// Delete a dialog and, via cascade, all of its messages.
    ///
    /// Deleting an unknown id is a no-op success.
    fn delete_dialog(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Update a dialog's name in place. Name emptiness is validated by
    /// the service layer, not here.
    fn rename_dialog(
        &self,
        id: i64,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert one message with the current timestamp.
    fn append_message(
        &self,
        dialog_id: i64,
        role: MessageRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<StoredMessage, RepositoryError>> + Send;

    /// Up to `limit` most recent messages for the dialog, returned in
    /// chronological (oldest-first) order. Selection is by descending id,
    /// then reversed; ascending id is chronological order here.
    fn recent_history(
        &self,
        dialog_id: i64,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMessage>, RepositoryError>> + Send;
}
