//! Health check endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::StorageHealthStatus;
use actix_web::{HttpResponse, web};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/detailed", web::get().to(detailed_health_check)),
    );
}

/// Liveness check used by load balancers
pub async fn health_check() -> HttpResponse {
    debug!("Health check requested");

    HttpResponse::Ok().json(ApiResponse::success(HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(crate::VERSION),
    }))
}

/// Document store and upload directory health, with per-collection counts
async fn detailed_health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Detailed health check requested");

    let storage = state.storage.health_check().await;
    let healthy = storage.overall;
    let status = DetailedHealthStatus {
        status: if healthy {
            Cow::Borrowed("healthy")
        } else {
            Cow::Borrowed("degraded")
        },
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(crate::VERSION),
        uptime_seconds: state.uptime_seconds(),
        storage,
    };

    if healthy {
        ApiResponse::success(status).to_http_response()
    } else {
        warn!("Detailed health check reports degraded storage");
        ApiResponse::failure(status, "Storage is degraded").to_http_response()
    }
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
}

/// Detailed health status
#[derive(Debug, Clone, serde::Serialize)]
struct DetailedHealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
    storage: StorageHealthStatus,
}
