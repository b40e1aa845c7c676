//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{Result, SuppliesError};
use tracing::info;

/// Server builder
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| SuppliesError::config("Configuration is required"))?;

        HttpServer::new(&config).await
    }
}

/// Build the server from `config` and run it until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting supplies-rs {}", crate::VERSION);

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Server starting at: http://{}", server.config().address());
    info!("API endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /health/detailed - Storage health");
    info!("   POST /api/import/{{schools|contacts|products|vendors}} - CSV import");

    server.start().await
}
