//! Dialog CRUD handlers for the chat service.

use axum::Json;
use axum::extract::{Path, State};

use fabula_types::dialog::{
    CreateDialogRequest, DialogSummary, MessageView, RenameDialogRequest,
};

use crate::http::error::AppError;
use crate::state::ChatState;

/// GET /dialogs - All dialogs, newest first.
pub async fn list_dialogs(
    State(state): State<ChatState>,
) -> Result<Json<Vec<DialogSummary>>, AppError> {
    let dialogs = state.chat_service.list_dialogs().await?;
    Ok(Json(dialogs.iter().map(DialogSummary::from).collect()))
}

/// POST /dialogs - Create a dialog; name defaults when omitted.
pub async fn create_dialog(
    State(state): State<ChatState>,
    Json(body): Json<CreateDialogRequest>,
) -> Result<Json<DialogSummary>, AppError> {
    let dialog = state.chat_service.create_dialog(body.name).await?;
    Ok(Json(DialogSummary::from(&dialog)))
}

/// DELETE /dialogs/:id - Delete a dialog and its messages.
///
/// Unknown ids still report success.
pub async fn delete_dialog(
    State(state): State<ChatState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.chat_service.delete_dialog(id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// PUT /dialogs/:id - Rename a dialog; 400 when the name is empty.
pub async fn rename_dialog(
    State(state): State<ChatState>,
    Path(id): Path<i64>,
    Json(body): Json<RenameDialogRequest>,
) -> Result<Json<DialogSummary>, AppError> {
    state.chat_service.rename_dialog(id, &body.name).await?;
    Ok(Json(DialogSummary {
        id,
        name: body.name,
    }))
}

/// GET /dialogs/:id/messages - The replayed window, chronological.
pub async fn list_messages(
    State(state): State<ChatState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MessageView>>, AppError> {
    let messages = state.chat_service.history(id).await?;
    Ok(Json(messages.iter().map(MessageView::from).collect()))
}
