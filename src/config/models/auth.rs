//! Authentication configuration

use super::*;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// JWT issuer
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    /// Roles allowed to run imports
    #[serde(default = "default_import_roles")]
    pub import_roles: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            jwt_issuer: default_jwt_issuer(),
            import_roles: default_import_roles(),
        }
    }
}

fn default_jwt_issuer() -> String {
    "supplies".to_string()
}

fn default_import_roles() -> Vec<String> {
    vec!["admin".to_string()]
}

fn generate_secure_jwt_secret() -> String {
    // Generate a 64-character secure random string
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Warn about insecure configuration
pub fn warn_insecure_config(config: &AuthConfig) {
    if config.import_roles.iter().any(|role| role != "admin") {
        warn!(
            "Imports are open to non-admin roles: {}",
            config.import_roles.join(", ")
        );
    }
}
