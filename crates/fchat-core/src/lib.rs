//! Business logic and port trait definitions for fchat.
//!
//! This crate defines the "ports" (credential store and LLM provider traits)
//! that the infrastructure layer implements. It depends only on
//! `fchat-types` -- never on `fchat-infra` or any network/IO crate.

pub mod auth;
pub mod chat;
pub mod llm;
