//! Integration tests for tapline-web API endpoints
//!
//! Each test builds the router against an in-memory SQLite database and a
//! temporary beatmaps directory, then drives it with `tower::ServiceExt`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tapline_common::{Beatmap, Note};
use tapline_web::{build_router, db, AppState};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

/// In-memory database shared by all pool connections in one test
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    db::init_tables(&pool).await.expect("table creation");
    pool
}

/// Router plus the beatmaps dir backing it
async fn setup_app() -> (axum::Router, TempDir) {
    let pool = setup_test_db().await;
    let beatmaps = TempDir::new().unwrap();
    let state = AppState::new(pool, beatmaps.path().to_path_buf());
    let app = build_router(state, beatmaps.path().to_path_buf());
    (app, beatmaps)
}

fn write_beatmap(dir: &TempDir, base: &str, song: &str, artist: &str) {
    let beatmap = Beatmap {
        song_name: song.to_string(),
        artist: artist.to_string(),
        duration: "2:05".to_string(),
        bpm: 120,
        notes: vec![Note::new(2.0, 1), Note::new(3.5, 3)],
    };
    beatmap.save(&dir.path().join(format!("{}.json", base))).unwrap();
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _maps) = setup_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "tapline-web");
}

// =============================================================================
// Song listing
// =============================================================================

#[tokio::test]
async fn test_song_listing_reads_beatmap_metadata() {
    let (app, maps) = setup_app().await;
    write_beatmap(&maps, "rock1", "One More Time", "Daft Punk");
    write_beatmap(&maps, "boss", "Epic Boss Theme", "Unknown Artist");

    let response = app.oneshot(get("/api/songs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    let songs = body.as_array().unwrap();
    assert_eq!(songs.len(), 2);

    // Sorted by id: "boss" before "rock1"
    assert_eq!(songs[0]["id"], "boss");
    assert_eq!(songs[0]["name"], "Epic Boss Theme");
    assert_eq!(songs[1]["id"], "rock1");
    assert_eq!(songs[1]["artist"], "Daft Punk");
}

#[tokio::test]
async fn test_song_listing_skips_unreadable_beatmaps() {
    let (app, maps) = setup_app().await;
    write_beatmap(&maps, "good", "Good Song", "Someone");
    std::fs::write(maps.path().join("broken.json"), b"{ not json").unwrap();
    std::fs::write(maps.path().join("notes.txt"), b"ignored").unwrap();

    let response = app.oneshot(get("/api/songs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    let songs = body.as_array().unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0]["id"], "good");
}

#[tokio::test]
async fn test_song_listing_empty_directory() {
    let (app, _maps) = setup_app().await;

    let response = app.oneshot(get("/api/songs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

// =============================================================================
// Score submission and ranking
// =============================================================================

#[tokio::test]
async fn test_submit_score_and_leaderboard_order() {
    let (app, _maps) = setup_app().await;

    // Twelve scores; only the top ten should come back, highest first
    for i in 0..12i64 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/submit-score",
                json!({ "name": format!("P{}", i), "score": i * 100, "music": "rock1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get("/api/scores/rock1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    let scores = body.as_array().unwrap();
    assert_eq!(scores.len(), 10);

    assert_eq!(scores[0]["rank"], 1);
    assert_eq!(scores[0]["player_name"], "P11");
    assert_eq!(scores[0]["score_value"], 1100);
    assert_eq!(scores[9]["rank"], 10);
    assert_eq!(scores[9]["score_value"], 200);
}

#[tokio::test]
async fn test_scores_are_scoped_per_song() {
    let (app, _maps) = setup_app().await;

    for (music, score) in [("rock1", 500), ("boss", 900)] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/submit-score",
                json!({ "name": "AL", "score": score, "music": music }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get("/api/scores/boss")).await.unwrap();
    let body = body_json(response.into_body()).await;
    let scores = body.as_array().unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0]["score_value"], 900);
}

#[tokio::test]
async fn test_submit_score_validation() {
    let (app, _maps) = setup_app().await;

    let cases = [
        json!({ "name": "", "score": 100, "music": "rock1" }),
        json!({ "name": "WAY_TOO_LONG_NAME", "score": 100, "music": "rock1" }),
        json!({ "name": "AL", "score": -5, "music": "rock1" }),
        json!({ "name": "AL", "score": 100, "music": "" }),
    ];

    for case in cases {
        let response = app
            .clone()
            .oneshot(post_json("/submit-score", case.clone()))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "payload should be rejected: {}",
            case
        );
    }
}

#[tokio::test]
async fn test_ranking_page_renders_all_scores() {
    let (app, maps) = setup_app().await;
    write_beatmap(&maps, "rock1", "One More Time", "Daft Punk");

    for (name, score) in [("ALICE", 9000), ("BOB", 7500), ("CAROL", 8200)] {
        app.clone()
            .oneshot(post_json(
                "/submit-score",
                json!({ "name": name, "score": score, "music": "rock1" }),
            ))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/scores/rock1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("One More Time"));
    assert!(html.contains("ALICE"));
    assert!(html.contains("BOB"));
    assert!(html.contains("CAROL"));

    // Descending order: ALICE before CAROL before BOB
    let alice = html.find("ALICE").unwrap();
    let carol = html.find("CAROL").unwrap();
    let bob = html.find("BOB").unwrap();
    assert!(alice < carol && carol < bob);
}

#[tokio::test]
async fn test_ranking_page_without_beatmap_still_renders() {
    let (app, _maps) = setup_app().await;

    let response = app.oneshot(get("/scores/unknown_song")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("No scores yet"));
}

// =============================================================================
// Accounts and sessions
// =============================================================================

#[tokio::test]
async fn test_register_login_session_flow() {
    let (app, _maps) = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/register",
            json!({ "username": "player1", "password": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/login",
            json!({ "username": "player1", "password": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let response = app
        .oneshot(get(&format!("/api/session/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["username"], "player1");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let (app, _maps) = setup_app().await;

    let payload = json!({ "username": "player1", "password": "hunter2" });
    let response = app
        .clone()
        .oneshot(post_json("/api/register", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json("/api/register", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validation() {
    let (app, _maps) = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/register",
            json!({ "username": "", "password": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/api/register",
            json!({ "username": "player1", "password": "abc" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let (app, _maps) = setup_app().await;

    app.clone()
        .oneshot(post_json(
            "/api/register",
            json!({ "username": "player1", "password": "hunter2" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/login",
            json!({ "username": "player1", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_session_not_found() {
    let (app, _maps) = setup_app().await;

    let response = app
        .oneshot(get("/api/session/not-a-real-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
