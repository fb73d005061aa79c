use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in mentor-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from one chat round or session operation, recovered at the HTTP
/// boundary.
///
/// None of these leave partially-applied mutations behind: a model or
/// storage failure abandons the round with the stored history untouched.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("session not found")]
    SessionNotFound,

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("model invocation failed: {0}")]
    Model(#[from] LlmError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}
