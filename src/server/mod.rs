//! HTTP server implementation
//!
//! Actix-web application exposing health checks and the batch import
//! endpoint.

pub mod builder;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;


pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
