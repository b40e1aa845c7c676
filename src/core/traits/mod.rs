//! Core traits
//!
//! Seams between the import pipeline and the backends it drives.

pub mod document_store;

pub use document_store::{
    BulkWriteReport, DocumentStore, DocumentWriteError, UnattributedFailures, WriteErrorKind,
};

#[cfg(test)]
pub use document_store::MockDocumentStore;
