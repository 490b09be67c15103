//! Application error type mapping to HTTP status codes and the wire body.
//!
//! Error responses are shaped `{"detail": "<reason>"}`; the frontend renders
//! `detail` verbatim, so the reason strings come straight from the
//! `AuthError` display impls.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use fchat_types::error::AuthError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Registration or login failure.
    Auth(AuthError),
    /// Malformed request field.
    Validation(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            AppError::Auth(err) => {
                let status = match err {
                    AuthError::InvalidUsername
                    | AuthError::InvalidPassword
                    | AuthError::UsernameTaken => StatusCode::BAD_REQUEST,
                    AuthError::StoreNotFound | AuthError::InvalidCredentials => {
                        StatusCode::UNAUTHORIZED
                    }
                    AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();

        let body = json!({ "detail": detail });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
