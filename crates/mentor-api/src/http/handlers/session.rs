//! Session HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/session              - Mint a fresh session token
//! - GET    /api/history              - List all sessions as summaries
//! - GET    /api/history/{sessionId}  - Get one session's turn history
//! - DELETE /api/history/{sessionId}  - Delete a session irrevocably

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use mentor_types::chat::{SessionId, SessionSummary, Turn};

use crate::http::error::AppError;
use crate::state::AppState;

/// Response body for a freshly minted session token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionResponse {
    pub session_id: SessionId,
}

/// GET /api/session - Mint a new session token.
///
/// Nothing is stored: the session materializes on its first successful
/// chat round.
pub async fn new_session() -> Json<NewSessionResponse> {
    Json(NewSessionResponse {
        session_id: SessionId::generate(),
    })
}

/// GET /api/history - List all stored sessions as `{sessionId, title}`.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionSummary>>, AppError> {
    let summaries = state.chat_service.summaries().await?;
    Ok(Json(summaries))
}

/// GET /api/history/{sessionId} - Get a session's ordered turn history.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Turn>>, AppError> {
    let history = state
        .chat_service
        .history(&SessionId::from(session_id))
        .await?;
    Ok(Json(history))
}

/// DELETE /api/history/{sessionId} - Delete a session and its history.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .chat_service
        .delete(&SessionId::from(session_id))
        .await?;
    Ok(Json(json!({ "message": "Session deleted successfully." })))
}
