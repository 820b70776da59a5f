//! Registration, login and session endpoints
//!
//! Accounts are optional for play; the client only needs them to attach
//! scores to a persistent identity. Sessions are opaque tokens the client
//! stores and presents back.

use crate::db::users;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 4;

/// Registration / login payload
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let username = request.username.trim();
    if username.is_empty() || username.len() > 32 {
        return Err(ApiError::BadRequest(
            "username must be 1-32 characters".to_string(),
        ));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    match users::create_user(&state.db, username, &request.password).await? {
        Some(user_id) => {
            tracing::info!(user = %username, "User registered");
            Ok(Json(json!({ "status": "success", "user_id": user_id })))
        }
        None => Err(ApiError::Conflict(format!(
            "username '{}' is already taken",
            username
        ))),
    }
}

/// POST /api/login
///
/// Issues a session token on valid credentials.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let username = request.username.trim();

    let user_id = users::verify_credentials(&state.db, username, &request.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid username or password".to_string()))?;

    let token = users::create_session(&state.db, user_id).await?;
    tracing::info!(user = %username, "User logged in");

    Ok(Json(json!({ "status": "success", "token": token })))
}

/// GET /api/session/:token
///
/// Resolves a session token to its user, for client session restore.
pub async fn session_info(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = users::session_user(&state.db, &token)
        .await?
        .ok_or_else(|| ApiError::NotFound("unknown session".to_string()))?;

    Ok(Json(json!({ "user_id": user.id, "username": user.username })))
}
