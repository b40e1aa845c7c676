//! Authentication validators

use super::trait_def::Validate;
use crate::auth::Role;
use crate::config::models::*;

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(
                "JWT secret must not use default values. Please generate a secure random secret."
                    .to_string(),
            );
        }

        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err("JWT expiration should not exceed 30 days for security reasons".to_string());
        }

        if self.import_roles.is_empty() {
            return Err("At least one role must be allowed to run imports".to_string());
        }

        for role in &self.import_roles {
            role.parse::<Role>()?;
        }

        Ok(())
    }
}
