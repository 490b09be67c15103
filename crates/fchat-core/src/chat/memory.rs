//! Sliding-window conversation memory.
//!
//! Each conversation keeps only its most recent exchanges. Older turns fall
//! out of the window and never reach the model again, which bounds prompt
//! growth for arbitrarily long conversations.

use std::collections::VecDeque;

use fchat_types::chat::ChatTurn;
use fchat_types::llm::{Message, MessageRole};

/// How many question/answer exchanges a conversation retains.
pub const DEFAULT_WINDOW_TURNS: usize = 5;

/// Bounded buffer of completed exchanges for one conversation.
#[derive(Debug)]
pub struct ConversationWindow {
    turns: VecDeque<ChatTurn>,
    capacity: usize,
}

impl ConversationWindow {
    /// Create an empty window retaining at most `capacity` turns (min 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a completed exchange, evicting the oldest once full.
    pub fn record(&mut self, user: String, assistant: String) {
        self.turns.push_back(ChatTurn::new(user, assistant));
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// Render the window as provider messages, oldest first, alternating
    /// user/assistant.
    pub fn messages(&self) -> Vec<Message> {
        self.turns
            .iter()
            .flat_map(|turn| {
                [
                    Message {
                        role: MessageRole::User,
                        content: turn.user.clone(),
                    },
                    Message {
                        role: MessageRole::Assistant,
                        content: turn.assistant.clone(),
                    },
                ]
            })
            .collect()
    }

    /// Number of retained exchanges.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
