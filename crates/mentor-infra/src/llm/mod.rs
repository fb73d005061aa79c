//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined
//! in `mentor-core`, currently Google Gemini.
//!
//! [`LlmProvider`]: mentor_core::llm::provider::LlmProvider

pub mod gemini;
