//! Environment-based configuration.
//!
//! Provider credentials come from `YC_API_KEY` and `YC_API_FOLDER_ID`.
//! The chat service treats their absence as a fatal startup error; the
//! story service stores the failure and replays it on every turn.

use std::path::PathBuf;

use secrecy::SecretString;

use fabula_types::error::ConfigError;

/// Model served through the folder-scoped completion endpoint.
pub const DEFAULT_MODEL: &str = "yandexgpt-lite";

/// Credentials and account scope for the completion endpoint.
///
/// The API key is wrapped in [`SecretString`] and is only exposed when
/// the HTTP client builds the `Authorization` header.
#[derive(Debug)]
pub struct ProviderConfig {
    pub api_key: SecretString,
    pub folder_id: String,
}

impl ProviderConfig {
    /// Read credentials from the environment.
    ///
    /// An unset or empty variable is a [`ConfigError::MissingEnv`] naming
    /// the variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = require_env("YC_API_KEY")?;
        let folder_id = require_env("YC_API_FOLDER_ID")?;
        Ok(Self {
            api_key: SecretString::from(api_key),
            folder_id,
        })
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name.to_string())),
    }
}

/// Resolve the data directory: `FABULA_DATA_DIR` env var, falling back
/// to `~/.fabula`, then `./.fabula` as a last resort.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FABULA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".fabula");
    }

    PathBuf::from(".fabula")
}
