//! Model gateway abstraction.
//!
//! The `LlmProvider` trait is implemented in `mentor-infra`
//! (e.g., `GeminiProvider`).

pub mod provider;
