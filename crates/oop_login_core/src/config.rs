//! Environment-driven settings for opening the store and starting logs.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging};
use rusqlite::Connection;
use serde::Deserialize;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "OOP_LOGIN_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "OOP_LOGIN_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "OOP_LOGIN_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoreConfig {
    /// SQLite file; `None` selects a private in-memory database.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default = "default_level_string")]
    pub log_level: String,
    /// Absolute log directory; `None` leaves logging off.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: default_level_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `OOP_LOGIN_DB_PATH`, `OOP_LOGIN_LOG_LEVEL` and `OOP_LOGIN_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            database_path: read(DB_PATH_ENV).map(PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(default_level_string),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Opens the configured database with all migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.database_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging stays off.
    pub fn init_logging(&self) -> Result<bool, String> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}

fn default_level_string() -> String {
    default_log_level().to_string()
}
