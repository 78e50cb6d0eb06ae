//! Server Configuration
//!
//! Everything is read from the environment with sensible defaults, so the
//! server starts with no configuration at all.

use crate::planner::DEFAULT_PORTAL_BASE_URL;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_PATH: &str = "learning_path.db";

/// Database path value that selects an in-memory database
pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// JSON array of curriculum items imported at startup
    pub catalog_seed: Option<PathBuf>,
    pub portal_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            catalog_seed: None,
            portal_base_url: DEFAULT_PORTAL_BASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            database_path: non_empty("DATABASE_PATH").unwrap_or(defaults.database_path),
            catalog_seed: non_empty("CATALOG_SEED").map(PathBuf::from),
            portal_base_url: non_empty("PORTAL_BASE_URL").unwrap_or(defaults.portal_base_url),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY_DATABASE
    }
}
