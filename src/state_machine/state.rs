//! Conversation state types

use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One immutable unit of conversation
///
/// The serialized form (`{"text": ..., "sender": "user" | "bot"}`) is also
/// the persisted history layout, so changing the field names here changes
/// what `restore` can read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// Conversation state
///
/// `Sending` covers exactly the window between a submission and its
/// settlement; the store's `pending` flag is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvState {
    /// Ready for user input, no request in flight
    #[default]
    Idle,

    /// A relay request is in flight
    Sending,
}

impl ConvState {
    /// True exactly while a relay request is in flight
    pub fn is_pending(self) -> bool {
        matches!(self, ConvState::Sending)
    }
}
