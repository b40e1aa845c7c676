//! Scoped ownership of an acquired upload

use super::local::UploadStore;
use super::types::UploadedFile;
use std::sync::Arc;
use tracing::warn;

/// Owns an acquired upload until it is released.
///
/// Call [`ScopedUpload::release`] on every normal path. If the guard is
/// dropped without it (panic, cancelled future), the file is removed
/// synchronously in `Drop`.
#[derive(Debug)]
pub struct ScopedUpload {
    store: Arc<UploadStore>,
    file: UploadedFile,
    released: bool,
}

impl ScopedUpload {
    pub fn new(store: Arc<UploadStore>, file: UploadedFile) -> Self {
        Self {
            store,
            file,
            released: false,
        }
    }

    pub fn file(&self) -> &UploadedFile {
        &self.file
    }

    /// Remove the file. Removal problems are logged, never returned.
    pub async fn release(mut self) {
        self.store.release(&self.file).await;
        self.released = true;
    }
}

impl Drop for ScopedUpload {
    fn drop(&mut self) {
        if !self.released {
            warn!(
                path = %self.file.storage_path.display(),
                "Upload guard dropped without release, removing file"
            );
            self.store.release_blocking(&self.file);
        }
    }
}
