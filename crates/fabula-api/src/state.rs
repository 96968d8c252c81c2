//! Application state wiring services to their infra implementations.
//!
//! The services are generic over repository/store/backend traits; the
//! states here pin them to the concrete infra types. Each service gets
//! its own state struct because the two servers never share a process.

use std::sync::Arc;

use anyhow::Context;

use fabula_core::chat::ChatService;
use fabula_core::story::StoryService;
use fabula_infra::config::{DEFAULT_MODEL, ProviderConfig, resolve_data_dir};
use fabula_infra::llm::YandexGptBackend;
use fabula_infra::session::InMemorySessionStore;
use fabula_infra::sqlite::{DatabasePool, SqliteDialogRepository};

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteChatService = ChatService<SqliteDialogRepository, YandexGptBackend>;
pub type ConcreteStoryService = StoryService<InMemorySessionStore, YandexGptBackend>;

/// Shared state for the chat service routes.
#[derive(Clone)]
pub struct ChatState {
    pub chat_service: Arc<ConcreteChatService>,
}

impl ChatState {
    /// Initialize the chat service: credentials, database, wiring.
    ///
    /// Missing provider credentials are a fatal startup error -- the
    /// process refuses to start rather than failing on the first turn.
    pub async fn init() -> anyhow::Result<Self> {
        let config =
            ProviderConfig::from_env().context("chat service requires provider credentials")?;

        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("chat.db").display());
        let pool = DatabasePool::new(&db_url).await?;

        let chat_service = ChatService::new(
            SqliteDialogRepository::new(pool),
            YandexGptBackend::new(config),
            DEFAULT_MODEL.to_string(),
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
        })
    }
}

/// Shared state for the story service routes.
#[derive(Clone)]
pub struct StoryState {
    pub story_service: Arc<ConcreteStoryService>,
}

impl StoryState {
    /// Initialize the story service.
    ///
    /// Credentials are resolved once, but their absence is not fatal:
    /// the stored failure surfaces per turn as the fallback payload.
    pub fn init() -> Self {
        let backend = ProviderConfig::from_env().map(YandexGptBackend::new);
        if let Err(err) = &backend {
            tracing::warn!(error = %err, "starting without provider credentials; every turn will fail");
        }

        let story_service = StoryService::new(
            InMemorySessionStore::new(),
            backend,
            DEFAULT_MODEL.to_string(),
        );

        Self {
            story_service: Arc::new(story_service),
        }
    }
}
