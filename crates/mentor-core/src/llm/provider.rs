//! LlmProvider trait definition.
//!
//! The model gateway makes exactly one external call per chat round and
//! either returns the model's text or fails; there is no automatic retry.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use mentor_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for generative-model backends.
///
/// Implementations live in mentor-infra (e.g., `GeminiProvider`). The
/// provider is opaque beyond this contract: decoding, token limits, and
/// model selection are its configuration. Callers must pass context in
/// strict chronological order because the external protocol replays each
/// prior turn as alternating-role context.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
