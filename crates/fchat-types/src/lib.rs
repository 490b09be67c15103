//! Shared domain types for fchat.
//!
//! This crate contains the core domain types used across the fchat backend:
//! chat turns and relay frames, LLM request/stream types, and the error
//! taxonomy for authentication, the credential store, and providers.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
