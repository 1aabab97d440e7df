//! Conversation history endpoint

use axum::{extract::State, Json};

use crate::analysis::Turn;
use crate::error::Result;
use crate::server::state::AppState;

/// GET /api/chat-history - Full ordered conversation history
pub async fn get_chat_history(State(state): State<AppState>) -> Result<Json<Vec<Turn>>> {
    Ok(Json(state.memory().history()))
}
