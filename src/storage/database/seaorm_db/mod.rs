// Module declarations
mod connection;
mod document_ops;
mod types;


// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
