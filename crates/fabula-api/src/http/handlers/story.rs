//! Story turn handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use fabula_types::story::{ContinueRequest, StoryTurn};

use crate::state::StoryState;

/// POST /api/continue - Run one narration turn.
///
/// Always 200: any failure (credentials, upstream, extraction) is
/// logged server-side and replaced with the fixed fallback record.
/// Upstream diagnostics never reach the client, and the session context
/// is only updated on success.
pub async fn continue_story(
    State(state): State<StoryState>,
    Json(body): Json<ContinueRequest>,
) -> Json<StoryTurn> {
    match state
        .story_service
        .continue_story(&body.session_id, &body.player_action)
        .await
    {
        Ok(turn) => Json(turn),
        Err(err) => {
            warn!(session_id = %body.session_id, error = %err, "Story turn failed");
            Json(StoryTurn::fallback())
        }
    }
}
