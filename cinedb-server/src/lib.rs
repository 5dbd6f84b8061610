//! cinedb-server: HTTP API over movies, stars and who played in what
//!
//! Layers, bottom-up:
//! - [`db`]: PostgreSQL pool, schema setup and repositories
//! - [`models`]: validated input types built at the API boundary
//! - [`http`]: axum router, extractors and JSON error responses

pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use error::{ServerError, ServerResult};
pub use http::{build_router, run_server, AppState, ServerConfig};
