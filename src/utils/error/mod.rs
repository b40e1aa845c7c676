//! Error handling for the service
//!
//! This module defines the crate error type, its helper constructors and the
//! HTTP rendering used by every handler.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{Result, SuppliesError};
