//! Integration tests for supplies-rs
//!
//! These tests drive real components together: the SeaORM store over
//! in-memory SQLite, the upload directory and the actix application.

pub mod database_tests;
pub mod import_http_tests;
pub mod import_pipeline_tests;
