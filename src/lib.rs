//! # supplies-rs
//!
//! Backend for a procurement and logistics team: schools, contacts,
//! products and vendors, with a fault-tolerant batch CSV import.
//!
//! ## Import pipeline
//!
//! An uploaded CSV file is written to a temporary upload directory, parsed
//! into header-keyed records, mapped into typed documents and inserted with
//! unordered semantics. Rows that fail mapping or storage are reported with
//! their row number while every other row is still stored. The temporary
//! file is removed on every path.
//!
//! ```rust,no_run
//! use supplies_rs::{Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/supplies.yaml").await?;
//!     let server = Server::new(config).await?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, SuppliesError};

pub use auth::{AuthSystem, Identity, Role};
pub use core::import::{
    ImportError, ImportFailure, ImportRequest, ImportService, ImportSummary, IncomingUpload,
};
pub use core::models::{CandidateDocument, EntityKind};
pub use core::traits::DocumentStore;
pub use storage::StorageLayer;

use tracing::info;

/// Configured HTTP service
pub struct Server {
    config: Config,
    server: server::HttpServer,
}

impl Server {
    /// Connect storage and assemble the HTTP server
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new server instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run until shutdown
    pub async fn run(self) -> Result<()> {
        info!(
            "Starting supplies-rs on {} ({} database)",
            self.config.server.address(),
            if self.config.storage.database.enabled {
                "persistent"
            } else {
                "in-memory"
            }
        );

        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Unix timestamp of the build
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
