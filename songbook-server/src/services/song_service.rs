//! Song catalog service
//!
//! Stateless facade over the storage and metadata capabilities. Adding a
//! song enriches it from the metadata provider first; reads normalize
//! paging before reaching storage.

use chrono::NaiveDate;
use songbook_common::{NewSong, Song, SongUpdate, Verse};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::fetch_gate::fetch_with_deadline;
use super::metadata_client::MetadataSource;
use super::verses::text_to_verses;
use super::ServiceError;
use crate::db::{SongFilter, SongRepository};
use crate::pagination;

/// How long `add_song` waits for the metadata provider
pub const FETCH_DEADLINE: Duration = Duration::from_secs(5);

/// Release date format used by the metadata provider (`DD.MM.YYYY`)
pub const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Song operations exposed to the HTTP layer
#[derive(Clone)]
pub struct SongService {
    repository: Arc<dyn SongRepository>,
    metadata: Arc<dyn MetadataSource>,
}

impl SongService {
    pub fn new(repository: Arc<dyn SongRepository>, metadata: Arc<dyn MetadataSource>) -> Self {
        Self {
            repository,
            metadata,
        }
    }

    /// List songs matching `group` OR `song` as substrings, one page at a time
    pub async fn get_songs(
        &self,
        group: &str,
        song: &str,
        raw_page: i64,
        raw_limit: i64,
    ) -> Result<Vec<Song>, ServiceError> {
        let paging = pagination::normalize(raw_page, raw_limit);
        let filter = SongFilter::new(group, song);

        Ok(self.repository.get_songs(&filter, paging).await?)
    }

    /// One page of a song's verses, in verse order
    pub async fn get_song_verses(
        &self,
        id: i64,
        raw_page: i64,
        raw_limit: i64,
    ) -> Result<Vec<Verse>, ServiceError> {
        let paging = pagination::normalize(raw_page, raw_limit);

        Ok(self.repository.get_song_verses(id, paging).await?)
    }

    pub async fn delete_song(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.repository.delete_song(id).await?)
    }

    /// Replace a song's metadata and verses, the verses parsed from `text`
    pub async fn update_song(&self, mut song: SongUpdate, text: &str) -> Result<(), ServiceError> {
        song.verses = text_to_verses(text);

        Ok(self.repository.update_song(&song).await?)
    }

    /// Enrich a song from the metadata provider and store it
    ///
    /// Returns the id assigned by storage. Nothing is stored when the
    /// fetch fails, times out, or yields an unparseable release date.
    pub async fn add_song(&self, group: &str, name: &str) -> Result<i64, ServiceError> {
        info!(group = %group, song = %name, "Enriching song");

        let song = self.enrich(group, name).await?;
        let id = self.repository.add_song(&song).await?;

        info!(id, group = %group, song = %name, verses = song.verses.len(), "Song added");
        Ok(id)
    }

    async fn enrich(&self, group: &str, name: &str) -> Result<NewSong, ServiceError> {
        let details =
            fetch_with_deadline(Arc::clone(&self.metadata), group, name, FETCH_DEADLINE).await?;

        let release_date = parse_release_date(&details.release_date)?;

        Ok(NewSong {
            group: group.to_string(),
            name: name.to_string(),
            release_date,
            link: details.link,
            verses: text_to_verses(&details.text),
        })
    }
}

/// Parse a provider release date (`DD.MM.YYYY`)
pub fn parse_release_date(value: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value.trim(), RELEASE_DATE_FORMAT).map_err(|source| {
        ServiceError::InvalidReleaseDate {
            value: value.to_string(),
            source,
        }
    })
}
