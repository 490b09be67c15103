//! Streaming chat-completion endpoint.
//!
//! POST /v1/chat/completions
//!
//! Streams the model's reply as a chunked `text/event-stream` body of bare
//! text deltas: no event framing, so the concatenated body is the reply
//! text. A provider failure ends the stream with one in-band
//! `\n[error] <message>` line appended to whatever partial output was
//! already sent.

use std::convert::Infallible;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::debug;

use fchat_core::chat::sessions::DEFAULT_SESSION;
use fchat_types::chat::ChatChunk;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for the chat-completion endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionRequest {
    /// The user's question.
    pub question: String,
    /// Session key isolating this caller's history; callers that omit it
    /// share the default conversation.
    pub session_id: Option<String>,
}

/// POST /v1/chat/completions: stream the model's reply.
pub async fn chat_completions(
    State(state): State<AppState>,
    Json(body): Json<ChatCompletionRequest>,
) -> Result<Response, AppError> {
    let session_key = match body.session_id.as_deref() {
        None => DEFAULT_SESSION.to_string(),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(AppError::Validation(
                    "session_id must not be empty".to_string(),
                ));
            }
            trimmed.to_string()
        }
    };

    let request_id = uuid::Uuid::now_v7();
    debug!(%request_id, session = %session_key, "chat completion requested");

    let chunks = state
        .chat_service
        .clone()
        .stream_reply(session_key, body.question);

    // Dropping the response body drops this stream and with it the upstream
    // provider stream, so a client disconnect stops consumption.
    let body_stream = chunks.map(|chunk| {
        Ok::<_, Infallible>(match chunk {
            ChatChunk::Delta(text) => Bytes::from(text),
            ChatChunk::Error(message) => Bytes::from(format!("\n[error] {message}")),
        })
    });

    Ok((
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(body_stream),
    )
        .into_response())
}
