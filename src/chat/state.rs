//! Conversation view state types

use serde::{Deserialize, Serialize};

/// Assistant turn every conversation starts with
pub const GREETING: &str = "Hi, I'm your assistant today! How can I help you?";

/// Assistant turn appended when the proxy call fails for any reason
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only list of turns. Lives only in memory for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// A fresh conversation holding only the greeting
    pub fn new() -> Self {
        Self {
            turns: vec![Turn::assistant(GREETING)],
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Append a turn. There is no way to remove or reorder turns.
    pub(super) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the conversation view holds
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatState {
    pub conversation: Conversation,
    /// Text typed but not yet submitted
    pub draft: String,
    /// A proxy call is in flight; the submit affordance is disabled
    pub awaiting_response: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }
}
