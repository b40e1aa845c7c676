//! Upload configuration

use serde::{Deserialize, Serialize};

/// Temporary upload storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploads are written to while they are imported
    #[serde(default = "default_upload_directory")]
    pub directory: String,
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Multipart field carrying the file
    #[serde(default = "default_field_name")]
    pub field_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: default_upload_directory(),
            max_upload_bytes: default_max_upload_bytes(),
            field_name: default_field_name(),
        }
    }
}

fn default_upload_directory() -> String {
    "uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_field_name() -> String {
    "file".to_string()
}
