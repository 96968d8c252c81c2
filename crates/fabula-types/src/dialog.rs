//! Dialog and message types for the chat service.
//!
//! Dialogs are persisted conversation threads; messages belong to exactly
//! one dialog and are immutable once written. Identifiers are the storage
//! layer's AUTOINCREMENT integers, so ascending id order is chronological
//! order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a persisted chat message.
///
/// `System` never reaches storage; it exists only for prompt turns sent
/// to the completion backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A persisted conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dialog {
    pub id: i64,
    pub name: String,
    pub created: DateTime<Utc>,
}

/// A single persisted message within a dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: i64,
    pub dialog_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub ts: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Wire DTOs for the chat HTTP surface
// ---------------------------------------------------------------------------

/// `{id, name}` summary returned by the dialog listing and mutation routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogSummary {
    pub id: i64,
    pub name: String,
}

impl From<&Dialog> for DialogSummary {
    fn from(d: &Dialog) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
        }
    }
}

/// Body of `POST /dialogs`. The name is optional; a timestamp-derived
/// default is synthesized when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDialogRequest {
    pub name: Option<String>,
}

/// Body of `PUT /dialogs/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameDialogRequest {
    #[serde(default)]
    pub name: String,
}

/// `{role, content}` view returned by the message listing route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub role: MessageRole,
    pub content: String,
}

impl From<&StoredMessage> for MessageView {
    fn from(m: &StoredMessage) -> Self {
        Self {
            role: m.role,
            content: m.content.clone(),
        }
    }
}

/// Body of `POST /dialogs/{id}/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Successful chat-turn response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
