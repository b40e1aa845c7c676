//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Server, CORS and upload validators
//! - `storage_validators`: Database validators
//! - `auth_validators`: Authentication validators
//! - `tests`: Test suite for all validators

mod auth_validators;
mod config_validators;
mod storage_validators;
mod trait_def;

pub use trait_def::Validate;
