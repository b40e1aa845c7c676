//! Test database utilities
//!
//! Every [`TestDatabase`] is an isolated, migrated in-memory SQLite
//! instance behind SeaORM.

use supplies_rs::config::DatabaseConfig;
use supplies_rs::core::models::{CandidateDocument, EntityKind};
use supplies_rs::core::traits::DocumentStore;
use supplies_rs::storage::database::Database;
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new migrated in-memory database
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1, // In-memory DB only supports 1 connection
            connection_timeout: 5,
            enabled: true,
            sqlite_fallback: false,
        };

        let db = Database::new(&config)
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner
    }

    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }

    /// The database as the import pipeline's document store
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.db_arc()
    }

    /// Insert documents directly, bypassing the import pipeline
    pub async fn seed(&self, kind: EntityKind, documents: Vec<CandidateDocument>) {
        let expected = documents.len();
        let report = self
            .inner
            .insert_many(kind, documents)
            .await
            .expect("Failed to seed test data");
        assert_eq!(report.inserted, expected, "seed rejected: {:?}", report);
    }

    pub async fn count(&self, kind: EntityKind) -> u64 {
        self.inner.count(kind).await.expect("Failed to count documents")
    }
}
