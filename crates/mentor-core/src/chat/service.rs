//! Chat service orchestrating one advisory round per request.
//!
//! Each round runs Loading -> Building -> Invoking -> Persisting: fetch the
//! session (absence means empty history), build the replayed context plus
//! wrapped prompt, call the model gateway once, then atomically append the
//! user and model turns as a pair. A gateway or storage failure abandons the
//! round with the stored history untouched; the caller resubmits.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};

use mentor_types::chat::{MessageRole, SessionId, SessionSummary, Turn};
use mentor_types::error::{ChatError, RepositoryError};

use crate::chat::prompt::AdvisorPromptBuilder;
use crate::chat::repository::ConversationRepository;
use crate::llm::provider::LlmProvider;

/// Orchestrates chat rounds and session operations.
///
/// Generic over `ConversationRepository` and `LlmProvider` so mentor-core
/// never depends on mentor-infra. Rounds against the same session id are
/// serialized by a per-key async mutex held for the whole round, so a
/// round's context always reflects the previous round's fully-persisted
/// turns and pairs are never interleaved.
pub struct ChatService<R: ConversationRepository, P: LlmProvider> {
    repo: R,
    provider: P,
    round_locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl<R: ConversationRepository, P: LlmProvider> ChatService<R, P> {
    /// Create a new chat service over the given repository and provider.
    pub fn new(repo: R, provider: P) -> Self {
        Self {
            repo,
            provider,
            round_locks: DashMap::new(),
        }
    }

    /// Run one chat round and return the model's response text.
    ///
    /// The session is created implicitly on the first successful round for
    /// an unseen token. Rounds for different session ids are fully
    /// independent.
    pub async fn round(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<String, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let lock = self.round_lock(session_id);
        let _guard = lock.lock().await;

        let history = match self.repo.find(session_id).await? {
            Some(session) => session.history,
            None => Vec::new(),
        };

        let request = AdvisorPromptBuilder::build(&history, message);

        let response = match self.provider.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Model invocation failed, round abandoned");
                return Err(ChatError::Model(e));
            }
        };

        let user_turn = Turn::now(MessageRole::User, message);
        let model_turn = Turn::now(MessageRole::Model, response.content.clone());
        self.repo
            .append_pair(session_id, &user_turn, &model_turn)
            .await?;

        info!(
            session_id = %session_id,
            prior_turns = history.len(),
            "Chat round persisted"
        );

        Ok(response.content)
    }

    /// Fetch a session's full ordered history.
    pub async fn history(&self, session_id: &SessionId) -> Result<Vec<Turn>, ChatError> {
        match self.repo.find(session_id).await? {
            Some(session) => Ok(session.history),
            None => Err(ChatError::SessionNotFound),
        }
    }

    /// List summaries of every stored session.
    pub async fn summaries(&self) -> Result<Vec<SessionSummary>, ChatError> {
        Ok(self.repo.list_summaries().await?)
    }

    /// Delete a session and its history irrevocably.
    pub async fn delete(&self, session_id: &SessionId) -> Result<(), ChatError> {
        match self.repo.delete(session_id).await {
            Ok(()) => {
                self.round_locks.remove(session_id);
                info!(session_id = %session_id, "Session deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(ChatError::SessionNotFound),
            Err(e) => Err(ChatError::Storage(e)),
        }
    }

    fn round_lock(&self, session_id: &SessionId) -> Arc<Mutex<()>> {
        self.round_locks
            .entry(session_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
