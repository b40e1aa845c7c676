//! HTTP server core implementation

use crate::auth::AuthSystem;
use crate::config::{Config, CorsConfig, ServerConfig};
use crate::core::import::ImportService;
use crate::server::middleware::AuthMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{Result, SuppliesError};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, connecting storage and building the import
    /// pipeline
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = StorageLayer::new(&config.storage, &config.uploads).await?;
        let auth = AuthSystem::new(&config.auth)?;
        let imports = ImportService::new(
            Arc::clone(&storage.uploads),
            Arc::clone(&storage.documents),
        )?;

        Ok(Self::from_state(AppState::new(
            config.clone(),
            auth,
            storage,
            imports,
        )))
    }

    /// Wrap an already assembled state
    pub fn from_state(state: AppState) -> Self {
        Self {
            config: state.config.server.clone(),
            state,
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = build_cors(&state.config.server.cors);
        let body_limit = state.config.server.max_body_size;

        App::new()
            .app_data(state)
            .app_data(web::JsonConfig::default().limit(body_limit))
            .wrap(AuthMiddleware)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "supplies-rs")))
            .configure(routes::health::configure_routes)
            .configure(routes::import::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .bind(&bind_addr)
            .map_err(|e| {
                SuppliesError::server(format!("Failed to bind {}: {}", bind_addr, e))
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| SuppliesError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

fn build_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(config.max_age);

    if config.allows_all_origins() {
        if config.allow_credentials {
            warn!("CORS allows every origin; credentials are not sent to wildcard origins");
        }
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        if config.allow_credentials {
            cors = cors.supports_credentials();
        }
    }

    cors
}
