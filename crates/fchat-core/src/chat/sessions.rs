//! Per-session window registry.
//!
//! Windows are created lazily the first time a session key is seen and live
//! for the rest of the process. Requests that do not name a session share
//! [`DEFAULT_SESSION`], so a single-user client gets one continuous
//! conversation without any bookkeeping on its side.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::chat::memory::ConversationWindow;

/// Session key used when a request carries no session id.
pub const DEFAULT_SESSION: &str = "default";

/// Maps opaque session keys to their conversation windows.
pub struct SessionRegistry {
    windows: DashMap<String, Arc<Mutex<ConversationWindow>>>,
    window_turns: usize,
}

impl SessionRegistry {
    /// Create a registry whose windows retain `window_turns` exchanges.
    pub fn new(window_turns: usize) -> Self {
        Self {
            windows: DashMap::new(),
            window_turns,
        }
    }

    /// Fetch the window for a session, creating it on first use.
    ///
    /// The per-window mutex serializes snapshot/commit pairs within one
    /// session while leaving other sessions untouched.
    pub fn window(&self, session_key: &str) -> Arc<Mutex<ConversationWindow>> {
        self.windows
            .entry(session_key.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(ConversationWindow::new(self.window_turns)))
            })
            .value()
            .clone()
    }

    /// Number of sessions seen so far.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
