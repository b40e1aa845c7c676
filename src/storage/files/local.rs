//! Local upload directory

use super::types::UploadedFile;
use crate::utils::error::{Result, SuppliesError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

const MAX_NAME_LEN: usize = 100;
const CREATE_ATTEMPTS: usize = 3;

/// Local directory holding uploads while they are imported
#[derive(Debug, Clone)]
pub struct UploadStore {
    base_path: PathBuf,
}

impl UploadStore {
    /// Open the upload directory, creating it if needed
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                SuppliesError::FileStorage(format!("Failed to create upload directory: {}", e))
            })?;
        }

        info!("Upload storage initialized at: {}", path.display());
        Ok(Self { base_path: path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write `content` under a fresh name. Never overwrites an existing file.
    pub async fn acquire(&self, original_name: &str, content: &[u8]) -> Result<UploadedFile> {
        let mut attempt = 0;
        let (path, mut file) = loop {
            attempt += 1;
            let path = self.base_path.join(Self::unique_name(original_name));
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < CREATE_ATTEMPTS => {
                    continue;
                }
                Err(e) => {
                    return Err(SuppliesError::FileStorage(format!(
                        "Failed to create upload file: {}",
                        e
                    )));
                }
            }
        };

        let written = async {
            file.write_all(content).await?;
            file.flush().await
        }
        .await;
        drop(file);

        if let Err(e) = written {
            let _ = fs::remove_file(&path).await;
            return Err(SuppliesError::FileStorage(format!(
                "Failed to write upload file: {}",
                e
            )));
        }

        let uploaded = UploadedFile {
            storage_path: path,
            original_name: original_name.to_string(),
            content_type: Self::detect_content_type(original_name),
            size: content.len() as u64,
            checksum: Self::calculate_checksum(content),
            stored_at: chrono::Utc::now(),
        };

        debug!(
            "Upload stored: {} -> {} ({} bytes)",
            original_name,
            uploaded.storage_path.display(),
            uploaded.size
        );
        Ok(uploaded)
    }

    /// Remove an upload. A file that is already gone counts as released.
    pub async fn release(&self, file: &UploadedFile) {
        match fs::remove_file(&file.storage_path).await {
            Ok(()) => debug!("Upload removed: {}", file.storage_path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Upload already removed: {}", file.storage_path.display())
            }
            Err(e) => warn!(
                "Error deleting temporary file {}: {}",
                file.storage_path.display(),
                e
            ),
        }
    }

    /// Blocking variant of [`UploadStore::release`] for use from `Drop`
    pub fn release_blocking(&self, file: &UploadedFile) {
        match std::fs::remove_file(&file.storage_path) {
            Ok(()) => debug!("Upload removed: {}", file.storage_path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Error deleting temporary file {}: {}",
                file.storage_path.display(),
                e
            ),
        }
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        if !self.base_path.exists() {
            return Err(SuppliesError::FileStorage(
                "Upload directory does not exist".to_string(),
            ));
        }

        let test_file = self.base_path.join(".health_check");
        fs::write(&test_file, b"health_check")
            .await
            .map_err(|e| SuppliesError::FileStorage(format!("Upload directory not writable: {}", e)))?;

        let _ = fs::remove_file(&test_file).await;

        Ok(())
    }

    /// `<unix millis>-<8 hex>-<sanitized original name>`
    pub(crate) fn unique_name(original_name: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}",
            crate::utils::current_timestamp_millis(),
            &token[..8],
            Self::sanitize_name(original_name)
        )
    }

    /// Keep only the final path component and a conservative character set
    pub(crate) fn sanitize_name(original_name: &str) -> String {
        let base = original_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();

        let sanitized: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .take(MAX_NAME_LEN)
            .collect();

        if sanitized.trim_matches('.').is_empty() {
            "upload.csv".to_string()
        } else {
            sanitized
        }
    }

    pub(crate) fn detect_content_type(filename: &str) -> String {
        match Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => "text/csv".to_string(),
            Some("tsv") => "text/tab-separated-values".to_string(),
            Some("txt") => "text/plain".to_string(),
            _ => "application/octet-stream".to_string(),
        }
    }

    fn calculate_checksum(content: &[u8]) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }
}
