//! External song metadata provider client
//!
//! The provider answers `GET {base_url}/info?group=..&song=..` with
//! `{"release_date": "DD.MM.YYYY", "text": "...", "link": "..."}`.

use async_trait::async_trait;
use songbook_common::SongDetails;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("songbook/", env!("CARGO_PKG_VERSION"));

/// Transport timeout; the fetch gate enforces the much shorter deadline
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Metadata provider errors
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Source of song details for enrichment
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Look up release date, lyrics and link for one song
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetails, MetadataError>;
}

/// HTTP client for the metadata provider
#[derive(Debug, Clone)]
pub struct MetadataClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MetadataClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MetadataError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataSource for MetadataClient {
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetails, MetadataError> {
        let url = format!("{}/info", self.base_url);

        tracing::debug!(group = %group, song = %song, url = %url, "Querying metadata provider");

        let response = self
            .http_client
            .get(&url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MetadataError::Api(status.as_u16(), error_text));
        }

        let details: SongDetails = response
            .json()
            .await
            .map_err(|e| MetadataError::Parse(e.to_string()))?;

        tracing::info!(
            group = %group,
            song = %song,
            release_date = %details.release_date,
            "Retrieved song details from metadata provider"
        );

        Ok(details)
    }
}
