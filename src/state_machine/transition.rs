//! Pure state transition function

use super::{ConvState, Effect, Event};
use thiserror::Error;

/// Bot message appended whenever a relay call settles with a failure
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
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

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("a relay request is already in flight")]
    RelayBusy,
    #[error("message is empty after trimming")]
    EmptyDraft,
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs this always produces the same outputs, with no
/// I/O side effects. Invariants enforced here: `Sending` is entered only
/// from a non-empty `Submit`, at most one relay call is in flight, and
/// every settlement appends exactly one bot message and returns to `Idle`.
pub fn transition(state: ConvState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Idle + Submit -> Sending, provided the trimmed text is non-empty
        (ConvState::Idle, Event::Submit { text }) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(TransitionError::EmptyDraft);
            }
            Ok(TransitionResult::new(ConvState::Sending)
                .with_effect(Effect::append_user(trimmed))
                .with_effect(Effect::ClearDraft)
                .with_effect(Effect::PersistHistory)
                .with_effect(Effect::ScrollToLatest)
                .with_effect(Effect::CallRelay {
                    message: trimmed.to_string(),
                }))
        }

        // Single-flight policy: reject submissions while a request is in flight
        (ConvState::Sending, Event::Submit { .. }) => Err(TransitionError::RelayBusy),

        // Sending + RelayReply -> Idle, appending the bot reply
        (ConvState::Sending, Event::RelayReply { text }) => {
            Ok(TransitionResult::new(ConvState::Idle)
                .with_effect(Effect::append_bot(text))
                .with_effect(Effect::PersistHistory)
                .with_effect(Effect::ScrollToLatest))
        }

        // Sending + RelayFailed -> Idle, appending the fixed fallback reply.
        // The failure detail stays in the event; it never reaches the history.
        (ConvState::Sending, Event::RelayFailed { .. }) => {
            Ok(TransitionResult::new(ConvState::Idle)
                .with_effect(Effect::append_bot(FALLBACK_REPLY))
                .with_effect(Effect::PersistHistory)
                .with_effect(Effect::ScrollToLatest))
        }

        // Settle events with nothing in flight
        (ConvState::Idle, Event::RelayReply { .. } | Event::RelayFailed { .. }) => Err(
            TransitionError::InvalidTransition("relay settled while idle".to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::{Message, Sender};

    fn appended(result: &TransitionResult) -> Vec<&Message> {
        result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::AppendMessage { message } => Some(message),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_submit_appends_user_and_calls_relay() {
        let result = transition(
            ConvState::Idle,
            Event::Submit {
                text: "  Hello  ".to_string(),
            },
        )
        .unwrap();

        assert_eq!(result.new_state, ConvState::Sending);
        let messages = appended(&result);
        assert_eq!(messages, vec![&Message::user("Hello")]);
        assert!(result.effects.contains(&Effect::ClearDraft));
        assert!(result.effects.contains(&Effect::PersistHistory));
        assert!(result.effects.contains(&Effect::ScrollToLatest));
        assert!(result.effects.contains(&Effect::CallRelay {
            message: "Hello".to_string()
        }));
    }

    #[test]
    fn test_whitespace_submit_is_rejected() {
        let result = transition(
            ConvState::Idle,
            Event::Submit {
                text: "   \n\t".to_string(),
            },
        );
        assert!(matches!(result, Err(TransitionError::EmptyDraft)));
    }

    #[test]
    fn test_submit_while_sending_is_rejected() {
        let result = transition(
            ConvState::Sending,
            Event::Submit {
                text: "again".to_string(),
            },
        );
        assert!(matches!(result, Err(TransitionError::RelayBusy)));
    }

    #[test]
    fn test_reply_settles_to_idle_with_bot_message() {
        let result = transition(
            ConvState::Sending,
            Event::RelayReply {
                text: "Hi there!".to_string(),
            },
        )
        .unwrap();

        assert_eq!(result.new_state, ConvState::Idle);
        assert_eq!(appended(&result), vec![&Message::bot("Hi there!")]);
        assert!(result.effects.contains(&Effect::PersistHistory));
    }

    #[test]
    fn test_failure_settles_to_idle_with_fallback() {
        let result = transition(
            ConvState::Sending,
            Event::RelayFailed {
                message: "connection refused".to_string(),
            },
        )
        .unwrap();

        assert_eq!(result.new_state, ConvState::Idle);
        let messages = appended(&result);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(messages[0].text, FALLBACK_REPLY);
        // The underlying failure detail must not leak into the history
        assert!(!messages[0].text.contains("connection refused"));
    }

    #[test]
    fn test_settle_while_idle_is_invalid() {
        let result = transition(
            ConvState::Idle,
            Event::RelayReply {
                text: "stray".to_string(),
            },
        );
        assert!(matches!(result, Err(TransitionError::InvalidTransition(_))));
    }
}
