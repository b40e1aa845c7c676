//! Configuration data models

#![allow(missing_docs)]

pub mod auth;
pub mod server;
pub mod storage;
pub mod uploads;

pub use auth::*;
pub use server::*;
pub use storage::*;
pub use uploads::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    5000
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_jwt_expiration() -> u64 {
    86400 // 24 hours
}

pub fn default_true() -> bool {
    true
}
