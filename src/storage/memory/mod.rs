//! In-memory document store
//!
//! Used when no database is configured. Enforces the same required-field
//! and unique-field rules as the database schema.

use crate::core::models::{CandidateDocument, EntityKind};
use crate::core::traits::{BulkWriteReport, DocumentStore, DocumentWriteError, WriteErrorKind};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

/// A stored document
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Collection {
    documents: Vec<StoredDocument>,
    unique: HashMap<&'static str, HashSet<String>>,
}

impl Collection {
    fn insert(&mut self, kind: EntityKind, document: CandidateDocument) -> std::result::Result<(), (WriteErrorKind, String)> {
        if document.kind() != kind {
            return Err((
                WriteErrorKind::Validation,
                format!("expected a {} document, got {}", kind, document.kind()),
            ));
        }
        if let Some(message) = document.validation_error() {
            return Err((WriteErrorKind::Validation, message));
        }

        let unique_values = document.unique_values();
        for (field, value) in &unique_values {
            if self.unique.get(field).is_some_and(|taken| taken.contains(value)) {
                return Err((
                    WriteErrorKind::DuplicateKey,
                    format!(
                        "duplicate key error in {}: {} {:?} already exists",
                        kind.collection(),
                        field,
                        value
                    ),
                ));
            }
        }

        for (field, value) in unique_values {
            self.unique.entry(field).or_default().insert(value);
        }

        let mut fields = document.to_fields();
        fields.retain(|_, value| !value.is_null());
        self.documents.push(StoredDocument {
            id: Uuid::new_v4(),
            fields,
            created_at: Utc::now(),
        });
        Ok(())
    }
}

/// Document store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<EntityKind, Collection>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored documents of `kind`, in insertion order
    pub fn documents(&self, kind: EntityKind) -> Vec<StoredDocument> {
        self.collections
            .read()
            .get(&kind)
            .map(|collection| collection.documents.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert_many(
        &self,
        kind: EntityKind,
        documents: Vec<CandidateDocument>,
    ) -> Result<BulkWriteReport> {
        let mut report = BulkWriteReport::default();
        let mut collections = self.collections.write();
        let collection = collections.entry(kind).or_default();

        for (index, document) in documents.into_iter().enumerate() {
            match collection.insert(kind, document) {
                Ok(()) => report.inserted += 1,
                Err((error_kind, message)) => {
                    debug!("Document {} of {} rejected: {}", index, kind, message);
                    report.write_errors.push(DocumentWriteError {
                        index,
                        kind: error_kind,
                        message,
                    });
                }
            }
        }

        Ok(report)
    }

    async fn count(&self, kind: EntityKind) -> Result<u64> {
        Ok(self
            .collections
            .read()
            .get(&kind)
            .map_or(0, |collection| collection.documents.len() as u64))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
