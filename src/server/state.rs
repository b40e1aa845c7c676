//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::core::import::ImportService;
use crate::storage::StorageLayer;
use std::sync::Arc;
use std::time::Instant;

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`, so cloning the state per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Token verification and role checks
    pub auth: Arc<AuthSystem>,
    /// Document store and upload directory
    pub storage: Arc<StorageLayer>,
    /// Batch import pipeline
    pub imports: Arc<ImportService>,
    started_at: Instant,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        auth: AuthSystem,
        storage: StorageLayer,
        imports: ImportService,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage: Arc::new(storage),
            imports: Arc::new(imports),
            started_at: Instant::now(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
