//! HTTP route modules

pub mod health;
pub mod import;

use actix_web::HttpResponse;

/// Standard envelope for service endpoints
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Unhealthy status reported with its payload
    pub fn failure(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message.into()),
        }
    }

    /// 200 for successful responses, 503 otherwise
    pub fn to_http_response(&self) -> HttpResponse {
        if self.success {
            HttpResponse::Ok().json(self)
        } else {
            HttpResponse::ServiceUnavailable().json(self)
        }
    }
}
