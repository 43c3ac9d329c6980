//! Song database operations

use async_trait::async_trait;
use chrono::Utc;
use songbook_common::{Error, NewSong, Result, Song, SongUpdate, Verse};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{SongFilter, SongRepository};
use crate::pagination::Paging;

/// SQLite-backed song storage
#[derive(Debug, Clone)]
pub struct SqliteSongRepository {
    pool: SqlitePool,
}

impl SqliteSongRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SongRepository for SqliteSongRepository {
    async fn get_songs(&self, filter: &SongFilter, paging: Paging) -> Result<Vec<Song>> {
        let rows = sqlx::query(
            r#"
            SELECT id, group_name, song_title, release_date, link, created_at, updated_at
            FROM songs
            WHERE (?1 = '' AND ?2 = '')
               OR (?1 <> '' AND group_name LIKE ?3 ESCAPE '\')
               OR (?2 <> '' AND song_title LIKE ?4 ESCAPE '\')
            ORDER BY id
            LIMIT ?5 OFFSET ?6
            "#,
        )
        .bind(&filter.group)
        .bind(&filter.song)
        .bind(contains_pattern(&filter.group))
        .bind(contains_pattern(&filter.song))
        .bind(paging.limit)
        .bind(paging.offset())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(song_from_row).collect()
    }

    async fn get_song_verses(&self, song_id: i64, paging: Paging) -> Result<Vec<Verse>> {
        let rows = sqlx::query(
            r#"
            SELECT verse_number, text
            FROM verses
            WHERE song_id = ?
            ORDER BY verse_number
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(song_id)
        .bind(paging.limit)
        .bind(paging.offset())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<Verse> {
                Ok(Verse {
                    verse_number: row.try_get("verse_number")?,
                    text: row.try_get("text")?,
                })
            })
            .collect()
    }

    async fn add_song(&self, song: &NewSong) -> Result<i64> {
        let now = Utc::now();

        // Dropping the transaction without commit rolls back
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO songs (group_name, song_title, release_date, link, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&song.group)
        .bind(&song.name)
        .bind(song.release_date)
        .bind(&song.link)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        insert_verses(&mut *tx, id, &song.verses).await?;

        tx.commit().await?;

        tracing::debug!(id, verses = song.verses.len(), "Song stored");
        Ok(id)
    }

    async fn update_song(&self, song: &SongUpdate) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE songs
            SET group_name = ?, song_title = ?, release_date = ?, link = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&song.group)
        .bind(&song.name)
        .bind(song.release_date)
        .bind(&song.link)
        .bind(Utc::now())
        .bind(song.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(Error::NotFound(format!("song {}", song.id)));
        }

        sqlx::query("DELETE FROM verses WHERE song_id = ?")
            .bind(song.id)
            .execute(&mut *tx)
            .await?;

        insert_verses(&mut *tx, song.id, &song.verses).await?;

        tx.commit().await?;

        tracing::debug!(id = song.id, verses = song.verses.len(), "Song replaced");
        Ok(())
    }

    async fn delete_song(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM verses WHERE song_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!(id, deleted, "Song delete executed");
        Ok(())
    }
}

async fn insert_verses(conn: &mut SqliteConnection, song_id: i64, verses: &[Verse]) -> Result<()> {
    for verse in verses {
        sqlx::query("INSERT INTO verses (song_id, verse_number, text) VALUES (?, ?, ?)")
            .bind(song_id)
            .bind(verse.verse_number)
            .bind(&verse.text)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    Ok(Song {
        id: row.try_get("id")?,
        group: row.try_get("group_name")?,
        name: row.try_get("song_title")?,
        release_date: row.try_get("release_date")?,
        link: row.try_get("link")?,
        verses: Vec::new(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// LIKE pattern matching `value` as a literal substring
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
