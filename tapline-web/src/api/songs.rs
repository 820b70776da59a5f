//! Song listing endpoint
//!
//! Reads every beatmap JSON file in the beatmaps directory and returns its
//! display metadata. The `notes` array is never interpreted here; only the
//! game client reads it.

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tapline_common::Beatmap;

/// One entry in the song list
#[derive(Debug, Serialize)]
pub struct SongEntry {
    /// Beatmap base name, used as the song key everywhere
    pub id: String,
    pub name: String,
    pub artist: String,
}

/// GET /api/songs
///
/// Lists available songs from the beatmap directory. Individual unreadable
/// beatmaps are skipped with a warning; the listing itself only fails when
/// the directory cannot be read.
pub async fn list_songs(State(state): State<AppState>) -> ApiResult<Json<Vec<SongEntry>>> {
    let entries = std::fs::read_dir(&state.beatmaps_dir).map_err(|e| {
        ApiError::Internal(format!(
            "cannot list beatmaps in {}: {}",
            state.beatmaps_dir.display(),
            e
        ))
    })?;

    let mut songs = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        match Beatmap::load(&path) {
            Ok(beatmap) => songs.push(SongEntry {
                id: id.to_string(),
                name: beatmap.song_name,
                artist: beatmap.artist,
            }),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Skipping unreadable beatmap");
            }
        }
    }

    // Stable listing order for the client menu
    songs.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(Json(songs))
}
