//! Effects produced by state transitions

/// Effects to be executed by the runtime after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the chat proxy with this text
    SendMessage { text: String },

    /// Bring the newest turn into view
    ScrollToLatest,

    /// State changed; observers should redraw
    Render,
}
