//! Database access for songbook-server
//!
//! SQLite storage for songs and their verses.

pub mod songs;

pub use songs::SqliteSongRepository;

use async_trait::async_trait;
use songbook_common::{NewSong, Result, Song, SongUpdate, Verse};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

use crate::pagination::Paging;

const MAX_CONNECTIONS: u32 = 8;

/// Substring filters for song listing
///
/// A non-empty field contributes "column contains value"; contributions
/// are OR-ed together. With both fields empty every song matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: String,
    pub song: String,
}

impl SongFilter {
    pub fn new(group: impl Into<String>, song: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            song: song.into(),
        }
    }
}

/// Persistence capability used by the song service
///
/// `add_song` and `update_song` must be atomic: song and verses are
/// written together or not at all.
#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn get_songs(&self, filter: &SongFilter, paging: Paging) -> Result<Vec<Song>>;

    async fn get_song_verses(&self, song_id: i64, paging: Paging) -> Result<Vec<Verse>>;

    /// Store a new song with its verses, returning the assigned id
    async fn add_song(&self, song: &NewSong) -> Result<i64>;

    /// Replace metadata and the full verse set of an existing song
    async fn update_song(&self, song: &SongUpdate) -> Result<()>;

    /// Delete by id; deleting a missing id succeeds
    async fn delete_song(&self, id: i64) -> Result<()>;
}

/// Open (creating if needed) the database file and ensure the schema
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    tracing::debug!("Connecting to database: {}", db_path.display());

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Single-connection in-memory database with schema, for tests and demos
pub async fn init_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    // Each in-memory connection is its own database, so keep exactly one
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create songs and verses tables if they don't exist
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_name TEXT NOT NULL,
            song_title TEXT NOT NULL,
            release_date TEXT NOT NULL,
            link TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS verses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            song_id INTEGER NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
            verse_number INTEGER NOT NULL,
            text TEXT NOT NULL,
            UNIQUE (song_id, verse_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_verses_song_id ON verses(song_id)")
        .execute(pool)
        .await?;

    tracing::info!("Database tables initialized (songs, verses)");

    Ok(())
}
