//! Song catalog endpoints
//!
//! Handlers parse query strings and bodies into plain values and hand
//! them to [`SongService`](crate::services::SongService). Paging values
//! arrive raw: missing or empty means 0, which the service then replaces
//! with its defaults.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use songbook_common::{Song, SongUpdate, Verse};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Query parameters for GET /song/details
#[derive(Debug, Deserialize)]
pub struct SongsQuery {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub song: String,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters for GET /song/text
#[derive(Debug, Deserialize)]
pub struct VersesQuery {
    pub id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters for DELETE /song/delete
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Body of POST /song/add
#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    pub group: String,
    pub song: String,
}

#[derive(Debug, Serialize)]
pub struct AddSongResponse {
    pub id: i64,
}

/// Body of PUT /song/edit; `text` holds the full lyrics
#[derive(Debug, Deserialize)]
pub struct UpdateSongRequest {
    pub id: i64,
    pub group: String,
    pub name: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub text: String,
}

/// Song as listed by GET /song/details (no verses)
#[derive(Debug, Serialize)]
pub struct SongSummary {
    pub id: i64,
    pub group: String,
    pub name: String,
    pub release_date: NaiveDate,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Song> for SongSummary {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            group: song.group,
            name: song.name,
            release_date: song.release_date,
            link: song.link,
            created_at: song.created_at,
            updated_at: song.updated_at,
        }
    }
}

/// GET /song/details?group=&song=&page=&limit=
pub async fn get_songs(
    State(state): State<AppState>,
    Query(query): Query<SongsQuery>,
) -> ApiResult<Json<Vec<SongSummary>>> {
    info!(
        group = %query.group,
        song = %query.song,
        page = ?query.page,
        limit = ?query.limit,
        "Received song list query"
    );

    let page = parse_paging_value("page", query.page.as_deref())?;
    let limit = parse_paging_value("limit", query.limit.as_deref())?;

    let songs = state
        .songs
        .get_songs(&query.group, &query.song, page, limit)
        .await?;

    info!(count = songs.len(), "Fetched songs");

    Ok(Json(songs.into_iter().map(SongSummary::from).collect()))
}

/// GET /song/text?id=&page=&limit=
pub async fn get_song_verses(
    State(state): State<AppState>,
    Query(query): Query<VersesQuery>,
) -> ApiResult<Json<Vec<Verse>>> {
    let id = parse_id(query.id.as_deref())?;
    let page = parse_paging_value("page", query.page.as_deref())?;
    let limit = parse_paging_value("limit", query.limit.as_deref())?;

    let verses = state.songs.get_song_verses(id, page, limit).await?;

    info!(id, page, limit, count = verses.len(), "Retrieved song verses");

    Ok(Json(verses))
}

/// POST /song/add
pub async fn add_song(
    State(state): State<AppState>,
    Json(request): Json<AddSongRequest>,
) -> ApiResult<(StatusCode, Json<AddSongResponse>)> {
    let group = request.group.trim();
    let song = request.song.trim();

    if group.is_empty() || song.is_empty() {
        return Err(ApiError::BadRequest(
            "both 'group' and 'song' are required".to_string(),
        ));
    }

    let id = state.songs.add_song(group, song).await?;

    Ok((StatusCode::CREATED, Json(AddSongResponse { id })))
}

/// PUT /song/edit
pub async fn update_song(
    State(state): State<AppState>,
    Json(request): Json<UpdateSongRequest>,
) -> ApiResult<StatusCode> {
    info!(id = request.id, group = %request.group, song = %request.name, "Received song update");

    let update = SongUpdate {
        id: request.id,
        group: request.group,
        name: request.name,
        release_date: request.release_date,
        link: request.link,
        verses: Vec::new(),
    };

    state.songs.update_song(update, &request.text).await?;

    info!(id = request.id, "Song updated");
    Ok(StatusCode::OK)
}

/// DELETE /song/delete?id=
pub async fn delete_song(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<StatusCode> {
    let id = parse_id(query.id.as_deref())?;

    state.songs.delete_song(id).await?;

    info!(id, "Song deleted");
    Ok(StatusCode::OK)
}

/// Build song catalog routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/song/details", get(get_songs))
        .route("/song/text", get(get_song_verses))
        .route("/song/add", post(add_song))
        .route("/song/edit", put(update_song))
        .route("/song/delete", delete(delete_song))
}

/// Missing or empty → 0; anything else must be an integer
fn parse_paging_value(name: &str, raw: Option<&str>) -> ApiResult<i64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => value.parse().map_err(|_| {
            ApiError::BadRequest(format!("'{}' must be an integer, got '{}'", name, value))
        }),
    }
}

fn parse_id(raw: Option<&str>) -> ApiResult<i64> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(ApiError::BadRequest("'id' is required".to_string()));
    }

    value
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("'id' must be an integer, got '{}'", value)))
}
