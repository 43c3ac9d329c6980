//! Liveness probe for the song catalog service
//!
//! Answers without touching storage or the metadata provider, so it
//! reports only that the process is up and serving HTTP.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Body of GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health: always `ok` while the server accepts requests
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "songbook-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Route for the liveness probe
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
