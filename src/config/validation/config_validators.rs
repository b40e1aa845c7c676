//! Server and upload validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::warn;

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count cannot be 0".to_string());
            }
        }

        self.cors.validate()
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled {
            if self.allows_all_origins() && self.allow_credentials {
                return Err("CORS cannot allow all origins (*) when credentials are enabled for security reasons".to_string());
            }

            if self.allows_all_origins() {
                warn!("CORS allows all origins. This may be insecure for production.");
            }
        }
        Ok(())
    }
}

impl Validate for UploadConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.trim().is_empty() {
            return Err("Upload directory cannot be empty".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("Max upload size cannot be 0".to_string());
        }

        if self.field_name.trim().is_empty() {
            return Err("Upload field name cannot be empty".to_string());
        }

        Ok(())
    }
}
