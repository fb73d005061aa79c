//! Shared domain types for MentorAI.
//!
//! This crate contains the core domain types used across the MentorAI
//! service: sessions, turns, LLM message shapes, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
