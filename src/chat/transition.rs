//! Pure state transition function
//!
//! Given the same state and event, `transition` always produces the same new
//! state and effects. All I/O happens in the runtime.

use super::event::{Key, KeyPress};
use super::state::{Turn, FALLBACK_REPLY};
use super::{ChatState, Effect, Event};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Events the view refuses. The runtime treats these as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Message is blank")]
    EmptyMessage,
    #[error("A reply is still pending")]
    AwaitingResponse,
    #[error("Nothing to delete")]
    EmptyDraft,
}

/// Pure transition function
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match event {
        // ============================================================
        // Input
        // ============================================================
        Event::KeyPress(press) if press.is_submit() => submit(state, state.draft.clone()),

        Event::KeyPress(KeyPress { key, .. }) => {
            let mut new_state = state.clone();
            match key {
                Key::Enter => new_state.draft.push('\n'),
                Key::Char(c) => new_state.draft.push(c),
                Key::Backspace => {
                    if new_state.draft.pop().is_none() {
                        return Err(TransitionError::EmptyDraft);
                    }
                }
            }
            Ok(TransitionResult::new(new_state).with_effect(Effect::Render))
        }

        Event::Submit { text } => submit(state, text),

        // ============================================================
        // Proxy outcomes
        // ============================================================

        // A reply is appended even if nothing is tracked as in flight: with
        // overlapping requests, replies land in the order they settle.
        Event::ReplyReceived { text } => Ok(append_reply(state, Turn::assistant(text))),

        Event::ReplyFailed { .. } => Ok(append_reply(state, Turn::assistant(FALLBACK_REPLY))),
    }
}

fn submit(state: &ChatState, text: String) -> Result<TransitionResult, TransitionError> {
    if text.trim().is_empty() {
        return Err(TransitionError::EmptyMessage);
    }
    if state.awaiting_response {
        return Err(TransitionError::AwaitingResponse);
    }

    let mut new_state = state.clone();
    new_state.conversation.push(Turn::user(text.clone()));
    new_state.draft.clear();
    new_state.awaiting_response = true;

    Ok(TransitionResult::new(new_state)
        .with_effect(Effect::Render)
        .with_effect(Effect::ScrollToLatest)
        .with_effect(Effect::SendMessage { text }))
}

fn append_reply(state: &ChatState, turn: Turn) -> TransitionResult {
    let mut new_state = state.clone();
    new_state.conversation.push(turn);
    new_state.awaiting_response = false;

    TransitionResult::new(new_state)
        .with_effect(Effect::Render)
        .with_effect(Effect::ScrollToLatest)
}
