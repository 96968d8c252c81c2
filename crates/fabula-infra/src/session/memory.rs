//! In-process session store backed by a concurrent map.
//!
//! Contexts live only in process memory: no expiry, lost on restart.
//! Map operations are atomic per key, but a story turn's
//! read-modify-write spans the completion call, so concurrent turns on
//! the same key interleave and the last writer wins.

use dashmap::DashMap;

use fabula_core::story::store::SessionStore;
use fabula_types::error::RepositoryError;
use fabula_types::story::OPENING_SCENE;

/// DashMap-backed implementation of `SessionStore`.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, String>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn get_or_init(&self, key: &str) -> Result<String, RepositoryError> {
        let entry = self
            .sessions
            .entry(key.to_string())
            .or_insert_with(|| OPENING_SCENE.to_string());
        Ok(entry.value().clone())
    }

    async fn update(&self, key: &str, context: String) -> Result<(), RepositoryError> {
        self.sessions.insert(key.to_string(), context);
        Ok(())
    }
}
