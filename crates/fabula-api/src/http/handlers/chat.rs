//! Chat turn handler.

use axum::Json;
use axum::extract::{Path, State};

use fabula_types::dialog::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::state::ChatState;

/// POST /dialogs/:id/chat - Run one chat turn.
///
/// 400 when the message is empty (nothing persisted); 500 with provider
/// diagnostics when the completion call fails.
pub async fn chat_turn(
    State(state): State<ChatState>,
    Path(id): Path<i64>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state.chat_service.chat_turn(id, &body.message).await?;
    Ok(Json(ChatReply { reply }))
}
