//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Enable database (if false, use in-memory storage)
    #[serde(default)]
    pub enabled: bool,
    /// Fall back to a local SQLite file when PostgreSQL is unreachable
    #[serde(default)]
    pub sqlite_fallback: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/supplies.db?mode=rwc".to_string(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            enabled: false,
            sqlite_fallback: false,
        }
    }
}
