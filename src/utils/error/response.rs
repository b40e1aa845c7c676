//! HTTP response handling for errors

use super::types::SuppliesError;
use crate::core::import::ImportError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl SuppliesError {
    /// Status code, stable error code and client-facing message for this error
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            SuppliesError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            SuppliesError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            SuppliesError::Import(import_error) => match import_error {
                ImportError::NoFileProvided => (
                    StatusCode::BAD_REQUEST,
                    "NO_FILE_PROVIDED",
                    import_error.to_string(),
                ),
                ImportError::Parse { .. } => (
                    StatusCode::BAD_REQUEST,
                    "PARSE_ERROR",
                    import_error.to_string(),
                ),
                ImportError::Upload(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPLOAD_STORAGE_ERROR",
                    "Failed to store uploaded file".to_string(),
                ),
                ImportError::Task(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                ),
            },
            SuppliesError::Auth(_) | SuppliesError::Jwt(_) => (
                StatusCode::UNAUTHORIZED,
                "AUTH_ERROR",
                "Not authorized, token missing or invalid".to_string(),
            ),
            SuppliesError::Authorization(_) => (
                StatusCode::FORBIDDEN,
                "AUTHORIZATION_ERROR",
                self.to_string(),
            ),
            SuppliesError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            SuppliesError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            SuppliesError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", self.to_string())
            }
            SuppliesError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "UPLOAD_TOO_LARGE",
                self.to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        }
    }
}

impl ResponseError for SuppliesError {
    fn status_code(&self) -> StatusCode {
        self.classify().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = self.classify();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None, // This should be set by middleware
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
