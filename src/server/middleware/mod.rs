//! HTTP middleware implementations
//!
//! - Bearer token authentication attaching the caller identity

mod auth;
mod helpers;


pub use auth::{AuthMiddleware, AuthMiddlewareService};
pub use helpers::{extract_bearer_token, is_public_route};
