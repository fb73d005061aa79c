//! HTTP/REST API layer for MentorAI.
//!
//! Axum-based JSON API at `/api/` with permissive CORS and request
//! tracing. Response shapes follow the session-store wire contract.

pub mod error;
pub mod handlers;
pub mod router;
