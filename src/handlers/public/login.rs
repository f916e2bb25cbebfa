use axum::{response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::config;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// POST /api/login - exchange the admin password for the static API token.
///
/// There is no per-user identity: every caller who knows the password
/// receives the same token the protected routes compare against. Failed
/// attempts learn nothing beyond the 401.
pub async fn login_post(Json(payload): Json<LoginRequest>) -> Result<impl IntoResponse, ApiError> {
    let config = config::config();

    if config.admin_password.is_empty() || payload.password != config.admin_password {
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    Ok(Json(json!({ "success": true, "token": config.auth_token })))
}
