//! Liveness endpoint. Answers without touching the database.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Body of `GET /health`
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl Health {
    const fn ok() -> Self {
        Self {
            status: "ok",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(|| async { Json(Health::ok()) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_crate_identity() {
        let health = Health::ok();
        assert_eq!(health.status, "ok");
        assert_eq!(health.service, "cinedb-server");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
