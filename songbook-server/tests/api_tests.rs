//! Integration tests for songbook-server API endpoints
//!
//! Each test builds the full router over an in-memory SQLite database and a
//! stub metadata provider, then drives it with `oneshot` requests.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use songbook_common::SongDetails;
use songbook_server::db::{self, SqliteSongRepository};
use songbook_server::services::{MetadataError, MetadataSource};
use songbook_server::{build_router, AppState, SongService};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method

/// Metadata provider answering every lookup the same way
struct StubProvider {
    release_date: &'static str,
    text: &'static str,
    fail: bool,
}

impl StubProvider {
    fn lyrics(text: &'static str) -> Self {
        Self {
            release_date: "16.07.2006",
            text,
            fail: false,
        }
    }

    fn broken() -> Self {
        Self {
            release_date: "",
            text: "",
            fail: true,
        }
    }
}

#[async_trait]
impl MetadataSource for StubProvider {
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetails, MetadataError> {
        if self.fail {
            return Err(MetadataError::Api(503, "provider unavailable".to_string()));
        }

        Ok(SongDetails {
            release_date: self.release_date.to_string(),
            text: self.text.to_string(),
            link: format!("https://example.com/{}/{}", group, song),
        })
    }
}

/// Test helper: Create app over a fresh in-memory database
async fn setup_app(provider: StubProvider) -> axum::Router {
    let pool = db::init_memory_pool()
        .await
        .expect("Should create in-memory database");
    let songs = SongService::new(
        Arc::new(SqliteSongRepository::new(pool)),
        Arc::new(provider),
    );
    build_router(AppState::new(songs))
}

fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: Add a song and return its id
async fn add_song(app: &axum::Router, group: &str, song: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/song/add",
            json!({ "group": group, "song": song }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    body["id"].as_i64().expect("id should be an integer")
}

// =============================================================================
// Health and build info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(StubProvider::lyrics("")).await;

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "songbook-server");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = setup_app(StubProvider::lyrics("")).await;

    let response = app
        .oneshot(test_request("GET", "/api/buildinfo"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["version"].is_string());
    assert!(body["git_hash"].is_string());
}

// =============================================================================
// Add and list
// =============================================================================

#[tokio::test]
async fn test_add_song_then_list() {
    let app = setup_app(StubProvider::lyrics("Ooh baby\n\nOoh")).await;

    let id = add_song(&app, "Muse", "Supermassive Black Hole").await;
    assert!(id > 0);

    let response = app
        .oneshot(test_request("GET", "/song/details?group=muse"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let songs = body.as_array().expect("Should be array");
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0]["id"], id);
    assert_eq!(songs[0]["group"], "Muse");
    assert_eq!(songs[0]["name"], "Supermassive Black Hole");
    assert_eq!(songs[0]["release_date"], "2006-07-16");
    assert_eq!(
        songs[0]["link"],
        "https://example.com/Muse/Supermassive Black Hole"
    );
}

#[tokio::test]
async fn test_list_filter_is_or_of_fields() {
    let app = setup_app(StubProvider::lyrics("la")).await;

    add_song(&app, "Muse", "Uprising").await;
    add_song(&app, "Queen", "Love of My Life").await;
    add_song(&app, "Adele", "Hello").await;

    let response = app
        .oneshot(test_request("GET", "/song/details?group=Muse&song=love"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Uprising", "Love of My Life"]);
}

#[tokio::test]
async fn test_list_defaults_to_five_per_page() {
    let app = setup_app(StubProvider::lyrics("la")).await;

    for n in 0..7 {
        add_song(&app, "Band", &format!("Track {}", n)).await;
    }

    let response = app
        .clone()
        .oneshot(test_request("GET", "/song/details?page=0&limit=0"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 5);

    let response = app
        .oneshot(test_request("GET", "/song/details?page=1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let songs = body.as_array().unwrap();
    assert_eq!(songs.len(), 2);
    assert_eq!(songs[0]["name"], "Track 5");
}

#[tokio::test]
async fn test_add_song_requires_both_fields() {
    let app = setup_app(StubProvider::lyrics("la")).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/song/add",
            json!({ "group": "Muse", "song": "  " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_add_song_provider_failure_is_bad_gateway() {
    let app = setup_app(StubProvider::broken()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/song/add",
            json!({ "group": "Muse", "song": "Uprising" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_GATEWAY");

    // Nothing was stored
    let response = app
        .oneshot(test_request("GET", "/song/details"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_song_malformed_release_date_is_bad_gateway() {
    let app = setup_app(StubProvider {
        release_date: "2006-07-16",
        text: "la",
        fail: false,
    })
    .await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/song/add",
            json!({ "group": "Muse", "song": "Uprising" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// =============================================================================
// Verses
// =============================================================================

#[tokio::test]
async fn test_song_text_is_paged_by_verse() {
    let app = setup_app(StubProvider::lyrics("One\n\nTwo\n\nThree\n\nFour")).await;
    let id = add_song(&app, "Band", "Count").await;

    let response = app
        .oneshot(test_request(
            "GET",
            &format!("/song/text?id={}&page=1&limit=2", id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body,
        json!([
            { "verse_number": 2, "text": "Three" },
            { "verse_number": 3, "text": "Four" }
        ])
    );
}

#[tokio::test]
async fn test_song_text_requires_id() {
    let app = setup_app(StubProvider::lyrics("la")).await;

    let response = app
        .clone()
        .oneshot(test_request("GET", "/song/text"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(test_request("GET", "/song/text?id=abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_numeric_paging_rejected() {
    let app = setup_app(StubProvider::lyrics("la")).await;

    let response = app
        .oneshot(test_request("GET", "/song/details?page=first"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("page"));
}

// =============================================================================
// Edit and delete
// =============================================================================

#[tokio::test]
async fn test_edit_song_replaces_metadata_and_verses() {
    let app = setup_app(StubProvider::lyrics("Old verse")).await;
    let id = add_song(&app, "Band", "Song").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/song/edit",
            json!({
                "id": id,
                "group": "Band",
                "name": "Song (Remastered)",
                "release_date": "2011-02-03",
                "link": "https://example.com/remaster",
                "text": "New one\n\nNew two"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(test_request("GET", "/song/details?song=remastered"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let songs = body.as_array().unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0]["release_date"], "2011-02-03");
    assert_eq!(songs[0]["link"], "https://example.com/remaster");

    let response = app
        .oneshot(test_request("GET", &format!("/song/text?id={}", id)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body,
        json!([
            { "verse_number": 0, "text": "New one" },
            { "verse_number": 1, "text": "New two" }
        ])
    );
}

#[tokio::test]
async fn test_edit_missing_song_is_not_found() {
    let app = setup_app(StubProvider::lyrics("la")).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/song/edit",
            json!({
                "id": 404,
                "group": "Nobody",
                "name": "Nothing",
                "release_date": "2000-01-01"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_song_removes_song_and_verses() {
    let app = setup_app(StubProvider::lyrics("A\n\nB")).await;
    let id = add_song(&app, "Band", "Gone").await;

    let response = app
        .clone()
        .oneshot(test_request("DELETE", &format!("/song/delete?id={}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(test_request("GET", "/song/details"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body.as_array().unwrap().is_empty());

    let response = app
        .oneshot(test_request("GET", &format!("/song/text?id={}", id)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_app(StubProvider::lyrics("la")).await;

    let response = app
        .oneshot(test_request("GET", "/song/unknown"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
