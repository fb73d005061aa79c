//! Google Gemini provider.
//!
//! Non-streaming `generateContent` client implementing the model gateway
//! contract: one call per chat round, text out or failure.

mod client;
mod types;

pub use client::GeminiProvider;
