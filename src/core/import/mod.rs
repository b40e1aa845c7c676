//! Batch record import pipeline
//!
//! An uploaded delimited file is parked in the temporary upload store, parsed
//! into raw records, mapped into typed candidate documents and bulk inserted
//! with unordered semantics. The summary reports every row that could not be
//! stored, and the temporary file is removed on every exit path.

mod error;
pub mod mapper;
pub mod orchestrator;
pub mod parser;
mod types;
pub mod writer;


pub use error::{ImportError, MappingError};
pub use mapper::{Coercion, FieldMapper, FieldRule, MappingTable};
pub use orchestrator::ImportService;
pub use parser::{ParsedRecords, RecordParser};
pub use types::{
    FailureKind, FailureStage, ImportFailure, ImportOutcome, ImportRequest, ImportStage,
    ImportSummary, IncomingUpload, RawRecord,
};
pub use writer::{BatchWriter, WriteOutcome};
