//! Business logic and repository trait definitions for MentorAI.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the prompt builder and the chat
//! orchestrator. It depends only on `mentor-types` -- never on
//! `mentor-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
