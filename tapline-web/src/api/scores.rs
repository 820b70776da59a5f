//! Score submission and ranking endpoints

use crate::db::scores::{self, MAX_PLAYER_NAME_LEN};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tapline_common::Beatmap;

/// How many scores the in-game leaderboard shows
const LEADERBOARD_SIZE: i64 = 10;

/// Score submission payload sent by the game client at the end of a run
#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub name: String,
    pub score: i64,
    pub music: String,
}

/// One ranked leaderboard entry
#[derive(Debug, Serialize)]
pub struct RankedScore {
    pub rank: usize,
    pub player_name: String,
    pub score_value: i64,
}

/// GET /api/scores/:music_id
///
/// Top ten scores for a song, highest first.
pub async fn get_high_scores(
    State(state): State<AppState>,
    Path(music_id): Path<String>,
) -> ApiResult<Json<Vec<RankedScore>>> {
    let rows = scores::top_scores(&state.db, &music_id, LEADERBOARD_SIZE).await?;

    let ranked = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| RankedScore {
            rank: i + 1,
            player_name: row.player_name,
            score_value: row.score_value,
        })
        .collect();

    Ok(Json(ranked))
}

/// POST /submit-score
///
/// Persists one gameplay result. The payload is validated, never trusted:
/// empty or oversized names and negative scores are rejected.
pub async fn submit_score(
    State(state): State<AppState>,
    Json(request): Json<SubmitScoreRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let name = request.name.trim();
    if name.is_empty() || name.len() > MAX_PLAYER_NAME_LEN {
        return Err(ApiError::BadRequest(format!(
            "player name must be 1-{} characters",
            MAX_PLAYER_NAME_LEN
        )));
    }
    if request.score < 0 {
        return Err(ApiError::BadRequest("score must be non-negative".to_string()));
    }
    if request.music.trim().is_empty() {
        return Err(ApiError::BadRequest("music id is required".to_string()));
    }

    scores::insert_score(&state.db, name, request.score, &request.music).await?;

    tracing::info!(player = %name, score = request.score, music = %request.music, "Score saved");

    Ok(Json(json!({
        "status": "success",
        "message": "Score saved!",
        "music": request.music,
    })))
}

/// GET /scores/:music_name
///
/// Full ranking page for one song, server-rendered. Song metadata comes from
/// the beatmap file when present; the page still renders without it.
pub async fn show_scores(
    State(state): State<AppState>,
    Path(music_name): Path<String>,
) -> ApiResult<Html<String>> {
    let rows = scores::all_scores(&state.db, &music_name).await?;

    let beatmap_path = state.beatmaps_dir.join(format!("{}.json", music_name));
    let song_info = Beatmap::load(&beatmap_path).ok();

    Ok(Html(render_scores_page(&music_name, song_info.as_ref(), &rows)))
}

/// Render the ranking page HTML
fn render_scores_page(
    music_name: &str,
    song_info: Option<&Beatmap>,
    rows: &[scores::ScoreRow],
) -> String {
    let title = match song_info {
        Some(beatmap) => format!(
            "{} - {}",
            escape_html(&beatmap.artist),
            escape_html(&beatmap.song_name)
        ),
        None => escape_html(music_name),
    };

    let mut table_rows = String::new();
    for (i, row) in rows.iter().enumerate() {
        table_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            i + 1,
            escape_html(&row.player_name),
            row.score_value
        ));
    }
    if rows.is_empty() {
        table_rows.push_str("<tr><td colspan=\"3\">No scores yet</td></tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Scores - {title}</title></head>
<body>
<h1>{title}</h1>
<table>
<thead><tr><th>Rank</th><th>Player</th><th>Score</th></tr></thead>
<tbody>
{table_rows}</tbody>
</table>
<p><a href="/">Back to game</a></p>
</body>
</html>
"#
    )
}

/// Minimal HTML escaping for user-provided strings
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
