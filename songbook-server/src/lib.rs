//! songbook-server library
//!
//! Song catalog service: stores, searches, pages, updates and deletes
//! songs, enriching new songs with release date, lyrics and link from an
//! external metadata provider.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod pagination;
pub mod services;

pub use crate::error::{ApiError, ApiResult};
pub use crate::services::SongService;

/// Maximum accepted request body (1 MiB)
pub const MAX_BODY_BYTES: usize = 1 << 20;

/// Per-request time limit
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Song catalog operations
    pub songs: SongService,
}

impl AppState {
    pub fn new(songs: SongService) -> Self {
        Self { songs }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::song_routes())
        .merge(api::health_routes())
        .route("/api/buildinfo", get(api::get_build_info))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
