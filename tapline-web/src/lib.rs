//! tapline-web library - rhythm game web backend
//!
//! Serves the game client's static assets, lists available songs from the
//! beatmap directory, stores and ranks gameplay scores, and provides a
//! minimal account layer (registration, login, session lookup).
//!
//! The server never generates beatmaps; it reads the same JSON files the
//! offline tool writes, as static data.

use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::services::ServeDir;

pub mod api;
pub mod db;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Score and account storage
    pub db: SqlitePool,
    /// Directory containing beatmap JSON files
    pub beatmaps_dir: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, beatmaps_dir: PathBuf) -> Self {
        Self { db, beatmaps_dir }
    }
}

/// Build the application router.
///
/// API and page routes are registered explicitly; anything else falls back
/// to the static game client assets.
pub fn build_router(state: AppState, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/health", get(api::health::health_check))
        .route("/api/songs", get(api::songs::list_songs))
        .route("/api/scores/:music_id", get(api::scores::get_high_scores))
        .route("/submit-score", post(api::scores::submit_score))
        .route("/scores/:music_name", get(api::scores::show_scores))
        .route("/api/register", post(api::auth::register))
        .route("/api/login", post(api::auth::login))
        .route("/api/session/:token", get(api::auth::session_info))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
