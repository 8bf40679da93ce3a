//! techgear-server: REST API over the TechGear catalog database
//!
//! Every route maps one HTTP request onto one parameterized SQL statement
//! against a single SQLite file. The crate is split into:
//! - `db`: connection pool, schema creation and per-entity repositories
//! - `http`: axum router, handlers and error mapping
//! - `models`: shared value types (mutation results, password hashes)

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_memory_pool, create_pool, DbError};
pub use http::{build_router, run_server, ServerConfig};
