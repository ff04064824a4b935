//! Advice chat handlers.

use crate::core::advice;
use crate::entities::ChatMessageModel;
use crate::errors::Result;
use crate::web::AppState;
use crate::web::extract::AuthUser;
use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

/// Body for one chat turn.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's question
    pub message: String,
}

/// `POST /api/chat` - returns the assistant's reply
pub async fn send(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatMessageModel>> {
    advice::send_message(
        &state.db,
        Arc::clone(&state.advisor),
        user_id,
        &body.message,
        Utc::now().date_naive(),
    )
    .await
    .map(Json)
}

/// `GET /api/chat` - full conversation, oldest first
pub async fn history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ChatMessageModel>>> {
    advice::history(&state.db, user_id).await.map(Json)
}
