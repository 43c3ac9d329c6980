//! HTTP API handlers for songbook-server

pub mod buildinfo;
pub mod health;
pub mod songs;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use songs::song_routes;
