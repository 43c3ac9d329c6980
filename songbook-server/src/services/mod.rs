//! Song enrichment and catalog services

pub mod fetch_gate;
pub mod metadata_client;
pub mod song_service;
pub mod verses;

pub use fetch_gate::fetch_with_deadline;
pub use metadata_client::{MetadataClient, MetadataError, MetadataSource};
pub use song_service::{SongService, FETCH_DEADLINE, RELEASE_DATE_FORMAT};
pub use verses::text_to_verses;

use std::time::Duration;
use thiserror::Error;

/// Service-level errors
///
/// Nothing is retried; every failure reaches the caller with no partial
/// write behind it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Provider returned a release date not in `DD.MM.YYYY` form
    #[error("Invalid release date '{value}': {source}")]
    InvalidReleaseDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Provider rejected the lookup or could not be reached
    #[error("Metadata fetch failed: {0}")]
    Fetch(#[from] MetadataError),

    /// Provider did not answer within the deadline
    #[error("Metadata fetch exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),

    /// Storage failure, passed through as-is
    #[error(transparent)]
    Storage(#[from] songbook_common::Error),
}
