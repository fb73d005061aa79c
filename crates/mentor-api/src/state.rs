//! Application state wiring all services together.
//!
//! `AppState` holds the concrete service instance used by both CLI commands
//! and REST API handlers. The chat service is generic over repository and
//! provider traits; AppState pins it to the SQLite and Gemini
//! implementations. The model client and store connection are constructed
//! once here and injected, never referenced as ambient globals.

use std::sync::Arc;

use secrecy::SecretString;

use mentor_core::chat::service::ChatService;
use mentor_infra::llm::gemini::GeminiProvider;
use mentor_infra::sqlite::conversation::SqliteConversationRepository;
use mentor_infra::sqlite::pool::{DatabasePool, default_database_url};

/// Default Gemini model when `MENTOR_MODEL` is not set.
const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteConversationRepository, GeminiProvider>;

/// Shared application state holding the chat service.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state from process configuration.
    ///
    /// Reads `MENTOR_DATA_DIR` (database location), `GEMINI_API_KEY`
    /// (required), and `MENTOR_MODEL` (optional model override).
    pub async fn init() -> anyhow::Result<Self> {
        let db_url = default_database_url();
        if let Some(dir) = db_url
            .strip_prefix("sqlite://")
            .and_then(|p| std::path::Path::new(p).parent().map(|d| d.to_path_buf()))
        {
            tokio::fs::create_dir_all(&dir).await?;
        }
        let db_url = format!("{db_url}?mode=rwc");

        let api_key = std::env::var("GEMINI_API_KEY")
            .map(SecretString::from)
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY is not set"))?;
        let model =
            std::env::var("MENTOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let db_pool = DatabasePool::new(&db_url).await?;
        let provider = GeminiProvider::new(api_key, model);

        Ok(Self::with_parts(db_pool, provider))
    }

    /// Wire the state from already-constructed parts.
    ///
    /// Also used by integration tests to point the provider at a mock
    /// server and the pool at a scratch database.
    pub fn with_parts(db_pool: DatabasePool, provider: GeminiProvider) -> Self {
        let repo = SqliteConversationRepository::new(db_pool.clone());
        let chat_service = ChatService::new(repo, provider);

        Self {
            chat_service: Arc::new(chat_service),
            db_pool,
        }
    }
}
