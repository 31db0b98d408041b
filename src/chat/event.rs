//! Events that drive the conversation view

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    KeyPress(KeyPress),
    Submit { text: String },

    // Proxy events
    ReplyReceived { text: String },
    ReplyFailed { reason: String },
}

/// Keys the view reacts to. Anything else is filtered out by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
}

/// A key press, with whether any modifier (shift, alt, ctrl) was held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modified: bool,
}

impl KeyPress {
    pub fn new(key: Key, modified: bool) -> Self {
        Self { key, modified }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c), false)
    }

    pub fn enter() -> Self {
        Self::new(Key::Enter, false)
    }

    pub fn modified_enter() -> Self {
        Self::new(Key::Enter, true)
    }

    pub fn backspace() -> Self {
        Self::new(Key::Backspace, false)
    }

    /// Plain Enter is the submit key
    pub fn is_submit(self) -> bool {
        self.key == Key::Enter && !self.modified
    }
}
