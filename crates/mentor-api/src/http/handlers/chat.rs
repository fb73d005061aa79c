//! Chat round HTTP handler.
//!
//! POST /api/chat runs one advisory round: replay the session's stored
//! context, invoke the model once, atomically persist the user/model turn
//! pair, and return the analysis text. A failed round mutates nothing and
//! the caller simply resubmits.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use mentor_types::chat::SessionId;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for a chat round.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The business idea or follow-up question.
    pub message: String,
    /// Session token the round belongs to (from GET /api/session, or any
    /// previously used token).
    pub session_id: String,
}

/// Response body for a completed chat round.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub analysis: String,
}

/// POST /api/chat - Run one chat round and return the model's analysis.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = SessionId::from(body.session_id);
    let analysis = state.chat_service.round(&session_id, &body.message).await?;
    Ok(Json(ChatResponse { analysis }))
}
