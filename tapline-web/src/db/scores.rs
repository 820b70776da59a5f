//! Score storage and ranking queries

use serde::Serialize;
use sqlx::SqlitePool;
use tapline_common::Result;

/// Maximum player name length accepted on submission
pub const MAX_PLAYER_NAME_LEN: usize = 10;

/// One stored score
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub player_name: String,
    pub score_value: i64,
}

/// Insert a new score for a song
pub async fn insert_score(
    pool: &SqlitePool,
    player_name: &str,
    score_value: i64,
    music_name: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO scores (player_name, score_value, music_name, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(player_name)
    .bind(score_value)
    .bind(music_name)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Best scores for a song, highest first, limited
pub async fn top_scores(pool: &SqlitePool, music_name: &str, limit: i64) -> Result<Vec<ScoreRow>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT player_name, score_value FROM scores WHERE music_name = ? ORDER BY score_value DESC LIMIT ?",
    )
    .bind(music_name)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(player_name, score_value)| ScoreRow {
            player_name,
            score_value,
        })
        .collect())
}

/// Every score for a song, highest first
pub async fn all_scores(pool: &SqlitePool, music_name: &str) -> Result<Vec<ScoreRow>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT player_name, score_value FROM scores WHERE music_name = ? ORDER BY score_value DESC",
    )
    .bind(music_name)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(player_name, score_value)| ScoreRow {
            player_name,
            score_value,
        })
        .collect())
}
