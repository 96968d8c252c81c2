//! SQLite dialog repository implementation.
//!
//! Implements `DialogRepository` from `fabula-core` using sqlx with the
//! split read/write pool: raw queries, private Row structs, RFC 3339
//! text timestamps. Every operation is one statement on its own pool
//! checkout; atomicity is per statement only.

use chrono::{DateTime, Utc};
use sqlx::Row;

use fabula_core::chat::repository::DialogRepository;
use fabula_types::dialog::{Dialog, MessageRole, StoredMessage};
use fabula_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `DialogRepository`.
pub struct SqliteDialogRepository {
    pool: DatabasePool,
}

impl SqliteDialogRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct DialogRow {
    id: i64,
    name: String,
    created: String,
}

impl DialogRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created: row.try_get("created")?,
        })
    }

    fn into_dialog(self) -> Result<Dialog, RepositoryError> {
        Ok(Dialog {
            id: self.id,
            name: self.name,
            created: parse_datetime(&self.created)?,
        })
    }
}

struct MessageRow {
    id: i64,
    dialog_id: i64,
    role: String,
    content: String,
    ts: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            dialog_id: row.try_get("dialog_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            ts: row.try_get("ts")?,
        })
    }

    fn into_message(self) -> Result<StoredMessage, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(StoredMessage {
            id: self.id,
            dialog_id: self.dialog_id,
            role,
            content: self.content,
            ts: parse_datetime(&self.ts)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// DialogRepository implementation
// ---------------------------------------------------------------------------

impl DialogRepository for SqliteDialogRepository {
    async fn list_dialogs(&self) -> Result<Vec<Dialog>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, created FROM dialogs ORDER BY id DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut dialogs = Vec::with_capacity(rows.len());
        for row in &rows {
            let dialog_row =
                DialogRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            dialogs.push(dialog_row.into_dialog()?);
        }

        Ok(dialogs)
    }

    async fn create_dialog(&self, name: &str) -> Result<Dialog, RepositoryError> {
        let created = Utc::now();
        let result = sqlx::query("INSERT INTO dialogs (name, created) VALUES (?, ?)")
            .bind(name)
            .bind(format_datetime(&created))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Dialog {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            created,
        })
    }

    /// Deleting an unknown dialog is a no-op success; the cascade removes
    /// any messages along with the row.
    async fn delete_dialog(&self, id: i64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM dialogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn rename_dialog(&self, id: i64, name: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE dialogs SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn append_message(
        &self,
        dialog_id: i64,
        role: MessageRole,
        content: &str,
    ) -> Result<StoredMessage, RepositoryError> {
        let ts = Utc::now();
        let result =
            sqlx::query("INSERT INTO messages (dialog_id, role, content, ts) VALUES (?, ?, ?, ?)")
                .bind(dialog_id)
                .bind(role.to_string())
                .bind(content)
                .bind(format_datetime(&ts))
                .execute(&self.pool.writer)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(StoredMessage {
            id: result.last_insert_rowid(),
            dialog_id,
            role,
            content: content.to_string(),
            ts,
        })
    }

    async fn recent_history(
        &self,
        dialog_id: i64,
        limit: i64,
    ) -> Result<Vec<StoredMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, dialog_id, role, content, ts FROM messages WHERE dialog_id = ? ORDER BY id DESC LIMIT ?",
        )
        .bind(dialog_id)
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        // Selected newest-first; callers always see chronological order.
        messages.reverse();
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_dialogs_newest_first() {
        let repo = SqliteDialogRepository::new(test_pool().await);

        let first = repo.create_dialog("first").await.unwrap();
        let second = repo.create_dialog("second").await.unwrap();
        assert!(second.id > first.id);

        let dialogs = repo.list_dialogs().await.unwrap();
        assert_eq!(dialogs.len(), 2);
        assert_eq!(dialogs[0].name, "second");
        assert_eq!(dialogs[1].name, "first");
    }

    #[tokio::test]
    async fn test_rename_persists() {
        let repo = SqliteDialogRepository::new(test_pool().await);

        let dialog = repo.create_dialog("old name").await.unwrap();
        repo.rename_dialog(dialog.id, "new name").await.unwrap();

        let dialogs = repo.list_dialogs().await.unwrap();
        assert_eq!(dialogs[0].name, "new name");
    }

    #[tokio::test]
    async fn test_delete_cascades_messages() {
        let repo = SqliteDialogRepository::new(test_pool().await);

        let dialog = repo.create_dialog("doomed").await.unwrap();
        repo.append_message(dialog.id, MessageRole::User, "hello")
            .await
            .unwrap();
        repo.append_message(dialog.id, MessageRole::Assistant, "hi")
            .await
            .unwrap();

        repo.delete_dialog(dialog.id).await.unwrap();

        assert!(repo.list_dialogs().await.unwrap().is_empty());
        assert!(repo.recent_history(dialog.id, 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_dialog_is_ok() {
        let repo = SqliteDialogRepository::new(test_pool().await);
        repo.delete_dialog(999).await.unwrap();
    }

    #[tokio::test]
    async fn test_recent_history_window_is_chronological() {
        let repo = SqliteDialogRepository::new(test_pool().await);
        let dialog = repo.create_dialog("window").await.unwrap();

        for content in ["A", "B", "C", "D"] {
            repo.append_message(dialog.id, MessageRole::User, content)
                .await
                .unwrap();
        }

        let window = repo.recent_history(dialog.id, 2).await.unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].content, "C");
        assert_eq!(window[1].content, "D");

        let full = repo.recent_history(dialog.id, 50).await.unwrap();
        let contents: Vec<&str> = full.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_append_to_missing_dialog_violates_fk() {
        let repo = SqliteDialogRepository::new(test_pool().await);

        let err = repo
            .append_message(12345, MessageRole::User, "orphan")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }

    #[tokio::test]
    async fn test_roles_round_trip_through_storage() {
        let repo = SqliteDialogRepository::new(test_pool().await);
        let dialog = repo.create_dialog("roles").await.unwrap();

        repo.append_message(dialog.id, MessageRole::User, "q")
            .await
            .unwrap();
        repo.append_message(dialog.id, MessageRole::Assistant, "a")
            .await
            .unwrap();

        let history = repo.recent_history(dialog.id, 50).await.unwrap();
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[1].role, MessageRole::Assistant);
    }
}
