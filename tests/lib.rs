//! Test suite for supplies-rs
//!
//! ## Test Categories
//!
//! ### 1. Common Utilities (`common/`)
//! - In-memory SQLite database helpers
//! - CSV and multipart fixtures, tokens and a ready-made test app
//!
//! ### 2. Integration Tests (`integration/`)
//! - Import pipeline against the SeaORM store
//! - Database operations and migrations
//! - The HTTP import endpoint end to end
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all tests
//! cargo test
//!
//! # Run only integration tests
//! cargo test --test lib
//! ```

pub mod common;
pub mod integration;
