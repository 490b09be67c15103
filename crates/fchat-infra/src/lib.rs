//! Infrastructure implementations for fchat.
//!
//! Everything that touches the outside world lives here: the flat-file
//! credential store, the OpenAI-compatible streaming provider, and the
//! environment-driven settings loader. Each implements (or feeds) a port
//! defined in `fchat-core`.

pub mod config;
pub mod credentials;
pub mod llm;
