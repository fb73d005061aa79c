//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `mentor-core` using sqlx with
//! split read/write pools: raw queries, private row structs, and a single
//! transaction for the two-turn append so a round's pair lands
//! all-or-nothing.

use chrono::{DateTime, Utc};
use sqlx::Row;

use mentor_core::chat::repository::ConversationRepository;
use mentor_types::chat::{
    MessageRole, NEW_CONVERSATION_TITLE, Session, SessionId, SessionSummary, Turn,
};
use mentor_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping turn rows to domain Turns.
struct TurnRow {
    role: String,
    text: String,
    created_at: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            role: row.try_get("role")?,
            text: row.try_get("text")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_turn(self) -> Result<Turn, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let timestamp = parse_datetime(&self.created_at)?;

        Ok(Turn {
            role,
            text: self.text,
            timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// ConversationRepository implementation
// ---------------------------------------------------------------------------

impl ConversationRepository for SqliteConversationRepository {
    async fn find(&self, session_id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let session_row = sqlx::query("SELECT id FROM sessions WHERE id = ?")
            .bind(session_id.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if session_row.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query(
            "SELECT role, text, created_at FROM turns WHERE session_id = ? ORDER BY seq ASC",
        )
        .bind(session_id.as_str())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut history = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row =
                TurnRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            history.push(turn_row.into_turn()?);
        }

        Ok(Some(Session {
            session_id: session_id.clone(),
            history,
        }))
    }

    async fn list_summaries(&self) -> Result<Vec<SessionSummary>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT s.id AS id,
                      (SELECT t.text FROM turns t
                        WHERE t.session_id = s.id
                        ORDER BY t.seq ASC LIMIT 1) AS first_text
                 FROM sessions s
                ORDER BY s.created_at DESC, s.id"#,
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let first_text: Option<String> = row
                .try_get("first_text")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            summaries.push(SessionSummary {
                session_id: SessionId(id),
                title: first_text.unwrap_or_else(|| NEW_CONVERSATION_TITLE.to_string()),
            });
        }

        Ok(summaries)
    }

    async fn append_pair(
        &self,
        session_id: &SessionId,
        user_turn: &Turn,
        model_turn: &Turn,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("INSERT INTO sessions (id, created_at) VALUES (?, ?) ON CONFLICT(id) DO NOTHING")
            .bind(session_id.as_str())
            .bind(format_datetime(&user_turn.timestamp))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let row = sqlx::query("SELECT COALESCE(MAX(seq), -1) AS seq FROM turns WHERE session_id = ?")
            .bind(session_id.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let max_seq: i64 = row
            .try_get("seq")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        for (offset, turn) in [user_turn, model_turn].into_iter().enumerate() {
            sqlx::query(
                "INSERT INTO turns (session_id, seq, role, text, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(session_id.as_str())
            .bind(max_seq + 1 + offset as i64)
            .bind(turn.role.to_string())
            .bind(&turn.text)
            .bind(format_datetime(&turn.timestamp))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id.as_str())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use std::sync::Arc;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn pair(user_text: &str, model_text: &str) -> (Turn, Turn) {
        (
            Turn::now(MessageRole::User, user_text),
            Turn::now(MessageRole::Model, model_text),
        )
    }

    #[tokio::test]
    async fn test_append_pair_creates_session_and_turns() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        let id = SessionId::generate();

        let (user, model) = pair("Idea X", "Looks promising");
        repo.append_pair(&id, &user, &model).await.unwrap();

        let session = repo.find(&id).await.unwrap().unwrap();
        assert_eq!(session.session_id, id);
        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].role, MessageRole::User);
        assert_eq!(session.history[0].text, "Idea X");
        assert_eq!(session.history[1].role, MessageRole::Model);
        assert_eq!(session.history[1].text, "Looks promising");
    }

    #[tokio::test]
    async fn test_append_pair_extends_in_order() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        let id = SessionId::generate();

        let (u1, m1) = pair("first", "reply one");
        let (u2, m2) = pair("second", "reply two");
        repo.append_pair(&id, &u1, &m1).await.unwrap();
        repo.append_pair(&id, &u2, &m2).await.unwrap();

        let history = repo.find(&id).await.unwrap().unwrap().history;
        let texts: Vec<&str> = history.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "reply one", "second", "reply two"]);
    }

    #[tokio::test]
    async fn test_find_unknown_session_returns_none() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        let found = repo.find(&SessionId::generate()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_is_idempotent() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        let id = SessionId::generate();
        let (user, model) = pair("Idea X", "analysis");
        repo.append_pair(&id, &user, &model).await.unwrap();

        let first = repo.find(&id).await.unwrap().unwrap();
        let second = repo.find(&id).await.unwrap().unwrap();
        assert_eq!(first.history.len(), second.history.len());
        for (a, b) in first.history.iter().zip(second.history.iter()) {
            assert_eq!(a.role, b.role);
            assert_eq!(a.text, b.text);
            assert_eq!(a.timestamp, b.timestamp);
        }
    }

    #[tokio::test]
    async fn test_summary_titles() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool.clone());

        let with_turns = SessionId::generate();
        let (user, model) = pair("A bakery for dogs", "analysis");
        repo.append_pair(&with_turns, &user, &model).await.unwrap();

        // An empty session is valid (created, no turns yet); insert directly.
        let empty = SessionId::generate();
        sqlx::query("INSERT INTO sessions (id, created_at) VALUES (?, ?)")
            .bind(empty.as_str())
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&pool.writer)
            .await
            .unwrap();

        let summaries = repo.list_summaries().await.unwrap();
        assert_eq!(summaries.len(), 2);
        let title_of = |id: &SessionId| {
            summaries
                .iter()
                .find(|s| &s.session_id == id)
                .map(|s| s.title.clone())
                .unwrap()
        };
        assert_eq!(title_of(&with_turns), "A bakery for dogs");
        assert_eq!(title_of(&empty), NEW_CONVERSATION_TITLE);
    }

    #[tokio::test]
    async fn test_summary_order_is_stable() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        for i in 0..3 {
            let id = SessionId::generate();
            let (user, model) = pair(&format!("idea {i}"), "analysis");
            repo.append_pair(&id, &user, &model).await.unwrap();
        }

        let first = repo.list_summaries().await.unwrap();
        let second = repo.list_summaries().await.unwrap();
        let ids = |s: &[SessionSummary]| {
            s.iter().map(|x| x.session_id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[tokio::test]
    async fn test_delete_cascades_turns() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool.clone());
        let id = SessionId::generate();
        let (user, model) = pair("Idea X", "analysis");
        repo.append_pair(&id, &user, &model).await.unwrap();

        repo.delete(&id).await.unwrap();

        assert!(repo.find(&id).await.unwrap().is_none());
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM turns WHERE session_id = ?")
            .bind(id.as_str())
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_session_is_not_found() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        let err = repo.delete(&SessionId::generate()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_distinct_sequence_slots() {
        let repo = Arc::new(SqliteConversationRepository::new(test_pool().await));
        let id = SessionId::generate();

        let mut handles = Vec::new();
        for i in 0..4 {
            let repo = Arc::clone(&repo);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                let (user, model) =
                    (Turn::now(MessageRole::User, format!("q{i}")),
                     Turn::now(MessageRole::Model, format!("a{i}")));
                repo.append_pair(&id, &user, &model).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let history = repo.find(&id).await.unwrap().unwrap().history;
        assert_eq!(history.len(), 8);
        // Every pair stays intact: user turn at even slots, its model turn
        // right after it.
        for pair in history.chunks(2) {
            assert_eq!(pair[0].role, MessageRole::User);
            assert_eq!(pair[1].role, MessageRole::Model);
            assert_eq!(
                pair[1].text.trim_start_matches('a'),
                pair[0].text.trim_start_matches('q')
            );
        }
    }
}
