//! Song catalog models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One normalized, ordinal-tagged segment of a song's lyrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// 0-based position within the song, dense across the song's verses
    pub verse_number: i64,
    /// Trimmed, non-empty verse text
    pub text: String,
}

impl Verse {
    pub fn new(verse_number: i64, text: impl Into<String>) -> Self {
        Self {
            verse_number,
            text: text.into(),
        }
    }
}

/// A persisted song
///
/// `id`, `created_at` and `updated_at` are assigned by storage. List
/// queries leave `verses` empty; verses are paged separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub group: String,
    pub name: String,
    pub release_date: NaiveDate,
    pub link: String,
    #[serde(default)]
    pub verses: Vec<Verse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fully enriched song that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewSong {
    pub group: String,
    pub name: String,
    pub release_date: NaiveDate,
    pub link: String,
    pub verses: Vec<Verse>,
}

/// Full replacement of an existing song's metadata and verse set
#[derive(Debug, Clone, PartialEq)]
pub struct SongUpdate {
    pub id: i64,
    pub group: String,
    pub name: String,
    pub release_date: NaiveDate,
    pub link: String,
    pub verses: Vec<Verse>,
}

/// Song details as returned by the external metadata provider
///
/// Lives only for the duration of one enrichment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetails {
    /// Release date in `DD.MM.YYYY` form
    pub release_date: String,
    /// Raw lyrics, verses separated by blank lines
    pub text: String,
    pub link: String,
}
