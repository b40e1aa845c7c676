//! Storage validators

use super::trait_def::Validate;
use crate::config::models::*;

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        self.database.validate()
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        if !self.url.starts_with("sqlite:")
            && !self.url.starts_with("postgres://")
            && !self.url.starts_with("postgresql://")
        {
            return Err(format!("Unsupported database URL scheme: {}", self.url));
        }

        if self.max_connections == 0 {
            return Err("Database max connections cannot be 0".to_string());
        }

        if self.connection_timeout == 0 {
            return Err("Database connection timeout cannot be 0".to_string());
        }

        Ok(())
    }
}
