//! Core functionality
//!
//! Domain models, the storage seam and the batch import pipeline.

pub mod import;
pub mod models;
pub mod traits;
