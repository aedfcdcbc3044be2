//! Chat bot handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use outlay_core::bot::ChatBot;

/// Request body for a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/chat - Send a message to the assistant
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::bad_request("Message is required"));
    }

    let rules = state
        .rules
        .read()
        .map_err(|_| AppError::internal("Rules lock poisoned"))?;
    let bot = ChatBot::new(&state.db, &rules)?;
    let reply = bot.respond(message).map_err(|e| match e {
        outlay_core::Error::InvalidData(msg) => AppError::bad_request(&msg),
        other => AppError::from(other),
    })?;

    Ok(Json(ChatResponse { reply }))
}
