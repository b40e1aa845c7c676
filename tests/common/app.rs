//! Fully wired application state for HTTP tests

use actix_web::web;
use std::sync::Arc;
use supplies_rs::auth::{AuthSystem, Role};
use supplies_rs::config::Config;
use supplies_rs::core::import::ImportService;
use supplies_rs::core::traits::DocumentStore;
use supplies_rs::server::AppState;
use supplies_rs::storage::StorageLayer;
use supplies_rs::storage::files::UploadStore;
use supplies_rs::storage::memory::MemoryDocumentStore;
use tempfile::TempDir;

/// Application state over a temporary upload directory
pub struct TestApp {
    pub upload_dir: TempDir,
    pub state: AppState,
}

impl TestApp {
    /// In-memory document store, default configuration
    pub async fn new() -> Self {
        Self::with_store(Arc::new(MemoryDocumentStore::new()), Config::default()).await
    }

    pub async fn with_store(documents: Arc<dyn DocumentStore>, mut config: Config) -> Self {
        let upload_dir = TempDir::new().expect("Failed to create upload dir");
        config.uploads.directory = upload_dir.path().to_string_lossy().into_owned();

        let uploads = Arc::new(
            UploadStore::new(upload_dir.path())
                .await
                .expect("Failed to create upload store"),
        );
        let storage = StorageLayer::from_parts(documents, uploads);
        let imports = ImportService::new(
            Arc::clone(&storage.uploads),
            Arc::clone(&storage.documents),
        )
        .expect("Failed to build import service");
        let auth = AuthSystem::new(&config.auth).expect("Failed to build auth system");

        Self {
            upload_dir,
            state: AppState::new(config, auth, storage, imports),
        }
    }

    pub fn data(&self) -> web::Data<AppState> {
        web::Data::new(self.state.clone())
    }

    /// `Authorization` header value for a user with `role`
    pub fn bearer(&self, role: Role) -> String {
        let token = self
            .state
            .auth
            .jwt()
            .create_access_token(&format!("{}-user", role), role)
            .expect("Failed to create token");
        format!("Bearer {}", token)
    }

    /// Files left in the upload directory
    pub fn leftover_uploads(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload dir")
            .count()
    }
}
