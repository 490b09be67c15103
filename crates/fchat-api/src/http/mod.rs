//! HTTP API layer for fchat.
//!
//! Axum-based API with three POST routes (register, login, streaming chat
//! completion), a health probe, restricted CORS, and per-request tracing.

pub mod error;
pub mod handlers;
pub mod router;
