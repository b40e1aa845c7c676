//! Upload storage types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file parked in the upload directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Where the file lives on disk
    pub storage_path: PathBuf,
    /// File name as sent by the client
    pub original_name: String,
    /// MIME content type guessed from the name
    pub content_type: String,
    /// File size in bytes
    pub size: u64,
    /// SHA-256 of the content
    pub checksum: String,
    pub stored_at: DateTime<Utc>,
}
