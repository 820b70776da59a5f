//! Account and session storage
//!
//! Passwords are stored as SHA-256 of a per-user random salt concatenated
//! with the password. Sessions are opaque v4 UUID tokens handed to the
//! client on login.

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use tapline_common::Result;
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Create a user; returns the new user id, or `None` when the username is
/// already taken
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<i64>> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(None);
    }

    let salt = generate_salt();
    let password_hash = hash_password(password, &salt);

    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, salt, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(&password_hash)
    .bind(&salt)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(Some(result.last_insert_rowid()))
}

/// Check credentials; returns the user id on success
pub async fn verify_credentials(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<i64>> {
    let row: Option<(i64, String, String)> =
        sqlx::query_as("SELECT id, password_hash, salt FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;

    match row {
        Some((id, stored_hash, salt)) if hash_password(password, &salt) == stored_hash => {
            Ok(Some(id))
        }
        _ => Ok(None),
    }
}

/// Create a session for a user and return its token
pub async fn create_session(pool: &SqlitePool, user_id: i64) -> Result<String> {
    let token = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a session token to its user
pub async fn session_user(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let row: Option<(i64, String)> = sqlx::query_as(
        r#"
        SELECT users.id, users.username
        FROM sessions
        JOIN users ON users.id = sessions.user_id
        WHERE sessions.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, username)| User { id, username }))
}

/// SHA-256 of salt + password, as 64 hex characters
fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Random 16-byte salt as hex
fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
