//! Legal assistant chat.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use legalconnect_core::service::chat::{ChatIntro, ChatReply};

use crate::http::response::{ApiResult, ok};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskBody {
    pub message: String,
}

/// GET /api/v1/chat - Greeting and sample questions.
pub async fn intro(State(state): State<AppState>) -> ApiResult<ChatIntro> {
    let start = Instant::now();
    Ok(ok(state.chat_service.intro(), start))
}

/// POST /api/v1/chat
///
/// A model failure still answers 200 with the apology text and
/// `fallback: true`.
pub async fn ask(
    State(state): State<AppState>,
    Json(body): Json<AskBody>,
) -> ApiResult<ChatReply> {
    let start = Instant::now();
    let reply = state.chat_service.ask(&body.message).await?;
    Ok(ok(reply, start))
}
