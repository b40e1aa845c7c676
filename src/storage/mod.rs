//! Storage layer
//!
//! Document storage (database or in-memory) and the temporary upload
//! directory.

/// Database storage module
pub mod database;
/// Upload storage module
pub mod files;
/// In-memory document storage module
pub mod memory;

use crate::config::{StorageConfig, UploadConfig};
use crate::core::models::EntityKind;
use crate::core::traits::DocumentStore;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main storage layer that orchestrates all storage backends
#[derive(Clone)]
pub struct StorageLayer {
    /// Document store for imported records
    pub documents: Arc<dyn DocumentStore>,
    /// Temporary upload directory
    pub uploads: Arc<files::UploadStore>,
}

impl std::fmt::Debug for StorageLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageLayer")
            .field("documents", &self.documents.backend_name())
            .field("uploads", &self.uploads.base_path())
            .finish()
    }
}

impl StorageLayer {
    /// Create a new storage layer, running migrations when a database is used
    pub async fn new(storage: &StorageConfig, uploads: &UploadConfig) -> Result<Self> {
        info!("Initializing storage layer");

        let documents: Arc<dyn DocumentStore> = if storage.database.enabled {
            debug!("Connecting to database");
            let database = database::Database::new(&storage.database).await?;
            database.migrate().await?;
            Arc::new(database)
        } else {
            warn!("Database disabled, imported records are kept in memory only");
            Arc::new(memory::MemoryDocumentStore::new())
        };

        debug!("Initializing upload storage");
        let uploads = Arc::new(files::UploadStore::new(&uploads.directory).await?);

        info!(
            "Storage layer initialized successfully ({} backend)",
            documents.backend_name()
        );
        Ok(Self { documents, uploads })
    }

    /// Assemble a storage layer from existing backends
    pub fn from_parts(documents: Arc<dyn DocumentStore>, uploads: Arc<files::UploadStore>) -> Self {
        Self { documents, uploads }
    }

    /// Health check for all storage backends
    pub async fn health_check(&self) -> StorageHealthStatus {
        let mut status = StorageHealthStatus {
            backend: self.documents.backend_name(),
            documents: false,
            uploads: false,
            overall: false,
            counts: BTreeMap::new(),
        };

        match self.documents.health_check().await {
            Ok(_) => status.documents = true,
            Err(e) => warn!("Document store health check failed: {}", e),
        }

        match self.uploads.health_check().await {
            Ok(_) => status.uploads = true,
            Err(e) => warn!("Upload storage health check failed: {}", e),
        }

        if status.documents {
            for kind in EntityKind::ALL {
                match self.documents.count(kind).await {
                    Ok(count) => {
                        status.counts.insert(kind.collection(), count);
                    }
                    Err(e) => warn!("Failed to count {}: {}", kind, e),
                }
            }
        }

        status.overall = status.documents && status.uploads;
        status
    }
}

/// Storage health status
#[derive(Debug, Clone, Serialize)]
pub struct StorageHealthStatus {
    /// Document store backend name
    pub backend: &'static str,
    /// Document store health
    pub documents: bool,
    /// Upload directory health
    pub uploads: bool,
    /// Overall health
    pub overall: bool,
    /// Stored documents per collection
    pub counts: BTreeMap<&'static str, u64>,
}
