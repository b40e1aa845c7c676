//! Error types for the service

use crate::core::import::ImportError;
use thiserror::Error;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, SuppliesError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum SuppliesError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Batch import errors that abort the whole request
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Authorization errors
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upload exceeded the configured size limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// File storage errors
    #[error("File storage error: {0}")]
    FileStorage(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
