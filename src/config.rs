//! Engine configuration: where and under which name a game is stored.

use crate::db::{MemoryStore, SlotStore, SqliteStore, StoreError};
use crate::games::tictactoe::DEFAULT_NAMESPACE;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Which slot store backs the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Backend {
    /// Slots live only as long as the process.
    Memory,
    /// Slots live in a SQLite file.
    #[default]
    Sqlite,
}

/// Configuration for a game session.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Prefix for every slot key.
    #[serde(default = "default_namespace")]
    namespace: String,

    /// Store backend.
    #[serde(default)]
    backend: Backend,

    /// SQLite database file, used by the `sqlite` backend.
    #[serde(default = "default_db_path")]
    db_path: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_db_path() -> String {
    "tictactoe.db".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            backend: Backend::default(),
            db_path: default_db_path(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(namespace = %config.namespace, backend = %config.backend, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the namespace.
    pub fn with_namespace(mut self, namespace: String) -> Self {
        self.namespace = namespace;
        self
    }

    /// Replaces the backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Replaces the database path.
    pub fn with_db_path(mut self, db_path: String) -> Self {
        self.db_path = db_path;
        self
    }

    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the SQLite database cannot be opened.
    #[instrument(skip(self), fields(backend = %self.backend))]
    pub fn open_store(&self) -> Result<Box<dyn SlotStore>, StoreError> {
        Ok(match self.backend {
            Backend::Memory => Box::new(MemoryStore::new()),
            Backend::Sqlite => Box::new(SqliteStore::open(self.db_path.clone())?),
        })
    }

    /// Opens the configured store, falling back to an in-memory one.
    ///
    /// An unavailable store reads as empty, so the game starts fresh and
    /// nothing is saved past the process.
    #[instrument(skip(self), fields(backend = %self.backend))]
    pub fn open_store_or_memory(&self) -> Box<dyn SlotStore> {
        self.open_store().unwrap_or_else(|e| {
            warn!(error = %e, "Store unavailable, playing without persistence");
            Box::new(MemoryStore::new())
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.namespace(), "tictactoe");
        assert_eq!(*config.backend(), Backend::Sqlite);
        assert_eq!(config.db_path(), "tictactoe.db");
    }

    #[test]
    fn test_parse_full_config() {
        let config: EngineConfig = toml::from_str(
            r#"
            namespace = "kitchen"
            backend = "memory"
            db_path = "/tmp/ignored.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.namespace(), "kitchen");
        assert_eq!(*config.backend(), Backend::Memory);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result: Result<EngineConfig, _> = toml::from_str(r#"backend = "redis""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_errors() {
        let err = EngineConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = EngineConfig::from_file_or_default("/definitely/not/here.toml").unwrap();
        assert_eq!(config.namespace(), "tictactoe");
    }

    #[test]
    fn test_memory_store_opens() {
        let config = EngineConfig::default().with_backend(Backend::Memory);
        let store = config.open_store().unwrap();
        assert!(store.load("tictactoe/board-state").unwrap().is_none());
    }

    #[test]
    fn test_unreachable_database_errors() {
        let config = EngineConfig::default().with_db_path("/no/such/dir/game.db".to_string());
        let err = config.open_store().err().expect("expected open_store to fail");
        assert!(err.message.contains("/no/such/dir/game.db"));
    }

    #[test]
    fn test_unreachable_database_falls_back_to_memory() {
        let config = EngineConfig::default().with_db_path("/no/such/dir/game.db".to_string());
        let mut store = config.open_store_or_memory();
        assert!(store.load("tictactoe/board-state").unwrap().is_none());

        store.save("tictactoe/board-state", "[]").unwrap();
        assert_eq!(
            store.load("tictactoe/board-state").unwrap().as_deref(),
            Some("[]")
        );
        assert!(!std::path::Path::new("/no/such/dir/game.db").exists());
    }
}
