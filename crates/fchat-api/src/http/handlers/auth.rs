//! Registration and login endpoints.
//!
//! POST /register validates and records a new user.
//! POST /login checks a username/password pair.
//!
//! Both take `{username, password}` and answer `{"message": ...}` on
//! success; failures surface through [`AppError`] as `{"detail": ...}`.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for /register and /login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// POST /register: validate the credential shapes and record the user.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .auth_service
        .register(&body.username, &body.password)
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Registration successful"
    })))
}

/// POST /login: accept iff the pair exactly matches a stored record.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .auth_service
        .login(&body.username, &body.password)
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Login successful"
    })))
}
