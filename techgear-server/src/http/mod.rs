//! HTTP server layer
//!
//! Axum server with:
//! - One handler per route, each calling one repository method
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses (plain text for missing query parameters)

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
