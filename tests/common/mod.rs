//! Common test utilities for supplies-rs
//!
//! ```rust,ignore
//! use crate::common::{TestDatabase, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let csv = fixtures::CsvBuilder::schools().row(&["A", "Kerala", "Kochi"]).build();
//!     // ...
//! }
//! ```

pub mod app;
pub mod database;
pub mod fixtures;

pub use app::TestApp;
pub use database::TestDatabase;
pub use fixtures::{CsvBuilder, MultipartBody};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}
