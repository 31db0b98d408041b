//! Property-based tests for the conversation view state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::state::*;
use super::transition::*;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,20}"
}

fn arb_key_press() -> impl Strategy<Value = KeyPress> {
    prop_oneof![
        4 => proptest::char::range('a', 'z').prop_map(KeyPress::char),
        1 => Just(KeyPress::char(' ')),
        1 => Just(KeyPress::enter()),
        1 => Just(KeyPress::modified_enter()),
        1 => Just(KeyPress::backspace()),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => arb_key_press().prop_map(Event::KeyPress),
        2 => arb_text().prop_map(|text| Event::Submit { text }),
        2 => arb_text().prop_map(|text| Event::ReplyReceived { text }),
        1 => arb_text().prop_map(|reason| Event::ReplyFailed { reason }),
    ]
}

/// Apply an event the way the runtime does: rejected events change nothing
fn step(state: &ChatState, event: Event) -> (ChatState, Vec<Effect>) {
    match transition(state, event) {
        Ok(result) => (result.new_state, result.effects),
        Err(_) => (state.clone(), vec![]),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Turns are never removed or rewritten: every earlier conversation is a
    /// prefix of every later one.
    #[test]
    fn prop_conversation_is_append_only(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = ChatState::new();
        for event in events {
            let before = state.conversation.turns().to_vec();
            let (next, _) = step(&state, event);
            prop_assert!(next.conversation.len() >= before.len());
            prop_assert_eq!(&next.conversation.turns()[..before.len()], before.as_slice());
            prop_assert!(next.conversation.len() - before.len() <= 1);
            state = next;
        }
        prop_assert_eq!(&state.conversation.turns()[0], &Turn::assistant(GREETING));
    }

    /// A request is issued exactly when a user turn is appended, and never
    /// while one is already awaited.
    #[test]
    fn prop_send_iff_user_turn(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = ChatState::new();
        for event in events {
            let was_awaiting = state.awaiting_response;
            let before = state.conversation.len();
            let (next, effects) = step(&state, event);

            let sends = effects.iter().filter(|e| matches!(e, Effect::SendMessage { .. })).count();
            let user_appended = next.conversation.len() > before
                && next.conversation.last().map(|t| t.role) == Some(Role::User);

            prop_assert_eq!(sends == 1, user_appended);
            prop_assert!(sends <= 1);
            if was_awaiting {
                prop_assert_eq!(sends, 0);
            }
            state = next;
        }
    }

    /// Every conversation change scrolls to the newest turn.
    #[test]
    fn prop_conversation_change_scrolls(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = ChatState::new();
        for event in events {
            let before = state.conversation.len();
            let (next, effects) = step(&state, event);
            if next.conversation.len() != before {
                prop_assert!(effects.contains(&Effect::ScrollToLatest));
                prop_assert!(effects.contains(&Effect::Render));
            }
            state = next;
        }
    }

    /// With strictly alternating submit/settle, the conversation grows by
    /// exactly two turns per exchange and alternates user/assistant.
    #[test]
    fn prop_sequential_exchanges_pair_up(
        exchanges in proptest::collection::vec((arb_text(), any::<bool>(), arb_text()), 0..10)
    ) {
        let mut state = ChatState::new();
        let mut completed = 0usize;
        for (text, ok, reply) in exchanges {
            let text = format!("q{text}");
            state = step(&state, Event::Submit { text: text.clone() }).0;
            prop_assert!(state.awaiting_response);
            let outcome = if ok {
                Event::ReplyReceived { text: reply.clone() }
            } else {
                Event::ReplyFailed { reason: reply.clone() }
            };
            state = step(&state, outcome).0;
            prop_assert!(!state.awaiting_response);
            completed += 1;

            let turns = state.conversation.turns();
            prop_assert_eq!(&turns[turns.len() - 2], &Turn::user(text));
            let expected = if ok { reply } else { FALLBACK_REPLY.to_string() };
            prop_assert_eq!(&turns[turns.len() - 1], &Turn::assistant(expected));
        }
        prop_assert_eq!(state.conversation.len(), 1 + 2 * completed);
    }

    /// A submit is rejected exactly when the text is blank or a reply is
    /// pending, and the error names which.
    #[test]
    fn prop_submit_rejection_reason(
        setup in proptest::collection::vec(arb_event(), 0..20),
        text in arb_text(),
    ) {
        let mut state = ChatState::new();
        for event in setup {
            state = step(&state, event).0;
        }
        let blank = text.trim().is_empty();
        match transition(&state, Event::Submit { text }) {
            Ok(_) => prop_assert!(!blank && !state.awaiting_response),
            Err(err) if blank => prop_assert_eq!(err, TransitionError::EmptyMessage),
            Err(err) => {
                prop_assert!(state.awaiting_response);
                prop_assert_eq!(err, TransitionError::AwaitingResponse);
            }
        }
    }
}
