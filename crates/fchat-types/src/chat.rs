//! Conversation types for fchat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed question/answer exchange in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// What the user asked.
    pub user: String,
    /// The full text the model answered with.
    pub assistant: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
            created_at: Utc::now(),
        }
    }
}

/// A frame produced by the chat relay for the transport layer.
///
/// `Delta` frames carry generated text verbatim; an `Error` frame carries the
/// failure description and is always the last frame of its stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatChunk {
    Delta(String),
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_turn_serde_roundtrip() {
        let turn = ChatTurn::new("hi", "hello there");
        let json = serde_json::to_string(&turn).unwrap();
        let parsed: ChatTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(turn, parsed);
    }

    #[test]
    fn test_chat_turn_timestamps_are_monotonic_enough() {
        let first = ChatTurn::new("a", "b");
        let second = ChatTurn::new("c", "d");
        assert!(second.created_at >= first.created_at);
    }
}
