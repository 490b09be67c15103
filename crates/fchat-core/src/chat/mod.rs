//! Conversation memory and the streaming chat relay.

pub mod memory;
pub mod service;
pub mod sessions;
