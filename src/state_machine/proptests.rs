//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::{Effect, Event};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?]{0,40}"
}

fn arb_whitespace() -> impl Strategy<Value = String> {
    "[ \t\n]{0,10}"
}

fn arb_settle_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(|text| Event::RelayReply { text }),
        arb_text().prop_map(|message| Event::RelayFailed { message }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(|text| Event::Submit { text }),
        arb_settle_event(),
    ]
}

fn bot_appends(effects: &[Effect]) -> Vec<&Message> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::AppendMessage { message } if message.sender == Sender::Bot => Some(message),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Whitespace-only submissions are a no-op: rejected, nothing appended,
    // no relay call issued.
    #[test]
    fn prop_whitespace_submit_never_appends(text in arb_whitespace()) {
        let result = transition(ConvState::Idle, Event::Submit { text });
        prop_assert!(matches!(result, Err(TransitionError::EmptyDraft)));
    }

    // A non-empty submit always enters Sending, appends exactly one user
    // message before anything else, and issues exactly one relay call.
    #[test]
    fn prop_submit_shape(text in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}") {
        let result = transition(ConvState::Idle, Event::Submit { text: text.clone() }).unwrap();
        prop_assert_eq!(result.new_state, ConvState::Sending);

        let appends: Vec<_> = result.effects.iter().filter(|e| {
            matches!(e, Effect::AppendMessage { .. })
        }).collect();
        prop_assert_eq!(appends.len(), 1);
        prop_assert!(
            matches!(
                &result.effects[0],
                Effect::AppendMessage { message } if message.sender == Sender::User
            ),
            "first effect must be a user AppendMessage"
        );

        let calls: Vec<_> = result.effects.iter().filter(|e| {
            matches!(e, Effect::CallRelay { .. })
        }).collect();
        prop_assert_eq!(calls.len(), 1);
    }

    // Every settlement, success or failure alike, returns to Idle and
    // appends exactly one bot message. Pending can never be left stuck.
    #[test]
    fn prop_settle_always_returns_idle(event in arb_settle_event()) {
        let result = transition(ConvState::Sending, event).unwrap();
        prop_assert_eq!(result.new_state, ConvState::Idle);
        prop_assert_eq!(bot_appends(&result.effects).len(), 1);
        prop_assert!(result.effects.contains(&Effect::PersistHistory));
        prop_assert!(result.effects.contains(&Effect::ScrollToLatest));
    }

    // Sending is only ever entered from a Submit in Idle: across any event
    // sequence, every accepted transition lands in a valid state and the
    // pending window opens and closes only at submit/settle boundaries.
    #[test]
    fn prop_pending_windows(events in proptest::collection::vec(arb_event(), 0..20)) {
        let mut state = ConvState::Idle;
        for event in events {
            let was_pending = state.is_pending();
            let submitted = matches!(event, Event::Submit { .. });
            match transition(state, event) {
                Ok(result) => {
                    state = result.new_state;
                    if state.is_pending() {
                        prop_assert!(!was_pending && submitted);
                    } else if was_pending {
                        prop_assert!(!submitted);
                    }
                }
                Err(_) => { /* rejected events leave the state untouched */ }
            }
        }
    }
}
