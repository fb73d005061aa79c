//! ConversationRepository trait definition.
//!
//! Durable mapping from session token to ordered turn history.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition); the SQLite
//! implementation lives in mentor-infra.

use mentor_types::chat::{Session, SessionId, SessionSummary, Turn};
use mentor_types::error::RepositoryError;

/// Repository trait for conversation session persistence.
pub trait ConversationRepository: Send + Sync {
    /// Read a session's full ordered history. Does not create.
    fn find(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// List every stored session as `{session_id, title}`.
    ///
    /// `title` derivation and ordering stability are the implementation's
    /// contract: first turn's text (placeholder when empty), newest session
    /// first with the id as tiebreak.
    fn list_summaries(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<SessionSummary>, RepositoryError>> + Send;

    /// Atomically create the session if absent, then append exactly the two
    /// given turns in order (user, then model).
    ///
    /// All-or-nothing: a concurrent reader sees both new turns or neither.
    /// A partial append is a correctness violation.
    fn append_pair(
        &self,
        session_id: &SessionId,
        user_turn: &Turn,
        model_turn: &Turn,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove the session and its turns entirely.
    ///
    /// Returns `RepositoryError::NotFound` when no such session exists.
    fn delete(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
