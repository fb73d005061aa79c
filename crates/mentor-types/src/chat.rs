//! Session and turn types for MentorAI conversations.
//!
//! A session is a uniquely identified conversation thread; its history is an
//! ordered sequence of turns produced in user-then-model pairs. Insertion
//! order is literal conversational order and is never reordered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// Re-export MessageRole as the turn role (stored roles and wire roles share
// the same two-value set).
pub use crate::llm::MessageRole;

/// Placeholder title for sessions with no turns yet.
pub const NEW_CONVERSATION_TITLE: &str = "New Conversation";

/// Opaque unique session token.
///
/// Generated tokens are UUIDv4 strings; tokens arriving from clients are
/// accepted as opaque keys without format validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a fresh session token with 128-bit-class randomness.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One message within a session's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Build a turn stamped with the current time.
    pub fn now(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A persisted conversation: one session token and its ordered turn history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: SessionId,
    pub history: Vec<Turn>,
}

/// Listing entry for a stored session.
///
/// `title` is the text of the session's first turn, or
/// [`NEW_CONVERSATION_TITLE`] when the history is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub title: String,
}
