//! Database storage implementation using SeaORM
//!
//! Directory records (schools, contacts, products, vendors) live in one
//! table per entity kind with unique indexes on their unique fields.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

pub use seaorm_db::SeaOrmDatabase as Database;
pub use seaorm_db::DatabaseBackendType;
