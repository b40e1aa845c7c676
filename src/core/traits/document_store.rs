//! Document store trait used by the batch writer

use crate::core::models::{CandidateDocument, EntityKind};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a single document was rejected by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteErrorKind {
    /// A unique index already holds the value
    DuplicateKey,
    /// The document failed schema validation (missing required field, ...)
    Validation,
    /// Any other storage failure
    Storage,
}

impl fmt::Display for WriteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteErrorKind::DuplicateKey => f.write_str("duplicate_key"),
            WriteErrorKind::Validation => f.write_str("validation"),
            WriteErrorKind::Storage => f.write_str("storage"),
        }
    }
}

/// Failure attributed to one submitted document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentWriteError {
    /// Position of the document in the submitted batch
    pub index: usize,
    pub kind: WriteErrorKind,
    pub message: String,
}

/// Failures the backend reported only as a count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnattributedFailures {
    pub count: usize,
    pub message: String,
}

/// Result of an unordered bulk insert
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkWriteReport {
    /// Documents the backend confirmed as stored
    pub inserted: usize,
    pub write_errors: Vec<DocumentWriteError>,
    pub unattributed: Option<UnattributedFailures>,
}

impl BulkWriteReport {
    /// Number of submitted documents this report accounts for
    pub fn accounted(&self) -> usize {
        self.inserted
            + self.write_errors.len()
            + self.unattributed.as_ref().map_or(0, |u| u.count)
    }
}

/// Storage backend for imported documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Insert every document of `kind` with unordered semantics.
    ///
    /// A failing document must not stop later documents from being
    /// attempted. Only failures that prevent the backend from reporting at
    /// all are returned as `Err`.
    async fn insert_many(
        &self,
        kind: EntityKind,
        documents: Vec<CandidateDocument>,
    ) -> Result<BulkWriteReport>;

    /// Number of stored documents of `kind`
    async fn count(&self, kind: EntityKind) -> Result<u64>;

    /// Backend health check
    async fn health_check(&self) -> Result<()>;
}
