//! Import pipeline types

use super::error::MappingError;
use crate::auth::Identity;
use crate::core::models::EntityKind;
use crate::core::traits::WriteErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One data row of a parsed file, keyed by the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    row: usize,
    headers: Arc<[String]>,
    values: Vec<String>,
    defect: Option<String>,
}

impl RawRecord {
    pub fn new(row: usize, headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self {
            row,
            headers,
            values,
            defect: None,
        }
    }

    /// Mark the record as unusable; the mapper rejects it with `reason`
    pub fn with_defect(mut self, reason: impl Into<String>) -> Self {
        self.defect = Some(reason.into());
        self
    }

    /// 1-based data row number
    pub fn row(&self) -> usize {
        self.row
    }

    /// Trimmed cell under `header`, or `None` if the column does not exist
    pub fn get(&self, header: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == header)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn defect(&self) -> Option<&str> {
        self.defect.as_deref()
    }
}

/// Pipeline stage a failure was detected in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Mapping,
    Write,
}

/// What went wrong with a failed row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A cell could not be coerced into its field type
    InvalidValue,
    /// The row's shape or encoding did not match the header
    MalformedRow,
    DuplicateKey,
    Validation,
    Storage,
}

impl From<WriteErrorKind> for FailureKind {
    fn from(kind: WriteErrorKind) -> Self {
        match kind {
            WriteErrorKind::DuplicateKey => FailureKind::DuplicateKey,
            WriteErrorKind::Validation => FailureKind::Validation,
            WriteErrorKind::Storage => FailureKind::Storage,
        }
    }
}

/// A row, or a group of rows, that was not stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    /// 1-based data row; `None` when storage reported the failures only in aggregate
    pub row: Option<usize>,
    pub stage: FailureStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub kind: FailureKind,
    /// Number of rows this entry stands for (1 unless aggregate)
    pub count: usize,
    pub reason: String,
}

impl ImportFailure {
    pub fn write(row: usize, kind: WriteErrorKind, reason: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            stage: FailureStage::Write,
            field: None,
            kind: kind.into(),
            count: 1,
            reason: reason.into(),
        }
    }

    /// Failures storage could not attribute to individual rows
    pub fn aggregate(count: usize, reason: impl Into<String>) -> Self {
        Self {
            row: None,
            stage: FailureStage::Write,
            field: None,
            kind: FailureKind::Storage,
            count,
            reason: reason.into(),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.row.is_none()
    }
}

impl From<MappingError> for ImportFailure {
    fn from(error: MappingError) -> Self {
        Self {
            row: Some(error.row),
            stage: FailureStage::Mapping,
            kind: if error.malformed {
                FailureKind::MalformedRow
            } else {
                FailureKind::InvalidValue
            },
            field: error.field,
            count: 1,
            reason: error.reason,
        }
    }
}

/// Counts and failures of one finished import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    /// Data rows read from the file
    pub attempted: usize,
    /// Documents storage confirmed as stored
    pub inserted: usize,
    /// Ordered by row; aggregate entries come last
    pub failures: Vec<ImportFailure>,
}

impl ImportOutcome {
    pub fn failed(&self) -> usize {
        self.failures.iter().map(|failure| failure.count).sum()
    }

    pub(crate) fn sort_failures(&mut self) {
        self.failures
            .sort_by_key(|failure| (failure.row.is_none(), failure.row));
    }
}

/// Response body of a completed import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub message: String,
    pub entity: EntityKind,
    pub import_id: String,
    pub attempted_count: usize,
    pub inserted_count: usize,
    pub failed_count: usize,
    pub failures: Vec<ImportFailure>,
}

impl ImportSummary {
    pub fn new(entity: EntityKind, import_id: impl Into<String>, outcome: ImportOutcome) -> Self {
        let failed = outcome.failed();
        let collection = entity.collection();
        let message = if outcome.attempted == 0 {
            format!("No {} imported; file contained no data rows.", collection)
        } else if failed == 0 && outcome.inserted == outcome.attempted {
            format!("{} {} imported successfully.", outcome.inserted, collection)
        } else {
            format!(
                "{} of {} {} imported; {} failed.",
                outcome.inserted, outcome.attempted, collection, failed
            )
        };

        Self {
            message,
            entity,
            import_id: import_id.into(),
            attempted_count: outcome.attempted,
            inserted_count: outcome.inserted,
            failed_count: failed,
            failures: outcome.failures,
        }
    }
}

/// An uploaded file as received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingUpload {
    pub original_name: String,
    pub content: Vec<u8>,
}

/// A request to import one uploaded file as records of one kind
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub kind: EntityKind,
    pub upload: Option<IncomingUpload>,
    pub identity: Identity,
}

/// Lifecycle of a single import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Received,
    FileAcquired,
    Parsed,
    Mapped,
    Written,
    Cleaned,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportStage::Received => "received",
            ImportStage::FileAcquired => "file_acquired",
            ImportStage::Parsed => "parsed",
            ImportStage::Mapped => "mapped",
            ImportStage::Written => "written",
            ImportStage::Cleaned => "cleaned",
        };
        f.write_str(name)
    }
}
