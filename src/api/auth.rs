use axum::http::{HeaderMap, header::AUTHORIZATION};
use chrono::{DateTime, Utc};

use crate::config::AppConfig;
use crate::storage::AdminSession;

use super::error::ApiError;
use super::state::ApiState;

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub fn credentials_match(config: &AppConfig, username: &str, password: &str) -> bool {
    match &config.admin_password {
        Some(expected) => username == config.admin_username && password == expected,
        None => false,
    }
}

/// Resolve the bearer token to a live admin session
pub async fn require_session(
    state: &ApiState,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> Result<AdminSession, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;

    let db = state.db.lock().await;
    db.find_active_session(token, now)
        .map_err(ApiError::store("Failed to verify session"))?
        .ok_or(ApiError::Unauthorized)
}
