//! Configuration management
//!
//! Configuration is read from a YAML file, then selected values are
//! overridden from the environment.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, SuppliesError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SuppliesError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| SuppliesError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults; then apply
    /// environment overrides
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::from_file(path).await?
        } else {
            warn!(
                "Configuration file {:?} not found, using defaults and environment",
                path
            );
            Self::default()
        };

        let config = config.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SUPPLIES_HOST`, `SUPPLIES_PORT`, `DATABASE_URL`,
    /// `SUPPLIES_UPLOAD_DIR` and `JWT_SECRET` from `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SUPPLIES_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SUPPLIES_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| SuppliesError::config(format!("Invalid SUPPLIES_PORT: {}", port)))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.storage.database.url = url;
            self.storage.database.enabled = true;
        }
        if let Some(directory) = lookup("SUPPLIES_UPLOAD_DIR") {
            self.uploads.directory = directory;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        Ok(self)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| SuppliesError::Config(format!("Server config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| SuppliesError::Config(format!("Storage config error: {}", e)))?;

        self.uploads
            .validate()
            .map_err(|e| SuppliesError::Config(format!("Upload config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| SuppliesError::Config(format!("Auth config error: {}", e)))?;

        crate::config::models::auth::warn_insecure_config(&self.auth);

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SuppliesError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
