use sea_orm::DatabaseConnection;

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

impl DatabaseBackendType {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("sqlite") {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatabaseBackendType::PostgreSQL => "postgres",
            DatabaseBackendType::SQLite => "sqlite",
        }
    }
}
