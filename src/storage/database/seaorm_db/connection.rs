use crate::config::DatabaseConfig;
use crate::utils::error::{Result, SuppliesError};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, SeaOrmDatabase};

const FALLBACK_SQLITE_URL: &str = "sqlite://data/supplies.db?mode=rwc";

impl SeaOrmDatabase {
    /// Create a new database connection with automatic SQLite fallback
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        match Self::try_connect(&config.url, config).await {
            Ok(db) => {
                let backend_type = DatabaseBackendType::from_url(&config.url);
                info!("Database connection established ({:?})", backend_type);
                Ok(Self { db, backend_type })
            }
            Err(e) => {
                if config.sqlite_fallback
                    && (config.url.starts_with("postgresql://")
                        || config.url.starts_with("postgres://"))
                {
                    warn!(
                        "PostgreSQL connection failed: {}. Attempting SQLite fallback...",
                        e
                    );
                    Self::fallback_to_sqlite(config).await
                } else {
                    Err(e)
                }
            }
        }
    }

    async fn try_connect(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url.to_string());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(SuppliesError::Database)
    }

    async fn fallback_to_sqlite(config: &DatabaseConfig) -> Result<Self> {
        let data_dir = std::path::Path::new("data");
        if !data_dir.exists() {
            std::fs::create_dir_all(data_dir).map_err(|e| {
                SuppliesError::Internal(format!("Failed to create data directory: {}", e))
            })?;
        }

        info!("Falling back to SQLite database: {}", FALLBACK_SQLITE_URL);
        let db = Self::try_connect(FALLBACK_SQLITE_URL, config).await?;

        info!("SQLite fallback connection established successfully");
        Ok(Self {
            db,
            backend_type: DatabaseBackendType::SQLite,
        })
    }

    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            SuppliesError::Database(e)
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the database connection
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(SuppliesError::Database)?;
        Ok(())
    }

    pub(super) async fn ping(&self) -> Result<()> {
        debug!("Performing database health check");
        self.db.ping().await.map_err(SuppliesError::Database)?;
        debug!("Database health check passed");
        Ok(())
    }
}
