//! Import error types

use thiserror::Error;

/// Errors that abort an import before anything is written
#[derive(Error, Debug)]
pub enum ImportError {
    /// The request carried no file upload
    #[error("No file uploaded")]
    NoFileProvided,

    /// The upload could not be written to the temporary store
    #[error("Failed to store uploaded file: {0}")]
    Upload(String),

    /// The file could not be read or its header row could not be decoded
    #[error("Failed to parse {file}: {reason}")]
    Parse { file: String, reason: String },

    /// The background import task did not complete
    #[error("Import task failed: {0}")]
    Task(String),
}

/// A single record that could not be mapped into a candidate document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("row {row}: {reason}")]
pub struct MappingError {
    /// 1-based data row number (the header row is not counted)
    pub row: usize,
    /// Source header of the offending cell, if the problem is cell-specific
    pub field: Option<String>,
    pub reason: String,
    /// The row's shape or encoding was unusable, as opposed to one bad value
    pub malformed: bool,
}

impl MappingError {
    /// A cell whose value could not be coerced
    pub fn invalid_value(row: usize, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            row,
            field: Some(field.into()),
            reason: reason.into(),
            malformed: false,
        }
    }

    /// A row that could not be interpreted at all
    pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
        Self {
            row,
            field: None,
            reason: reason.into(),
            malformed: true,
        }
    }
}
