//! Effects produced by state transitions

use super::state::Message;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the conversation history
    AppendMessage { message: Message },

    /// Clear the draft input
    ClearDraft,

    /// Re-persist the full message history
    PersistHistory,

    /// Scroll the view to the newest entry
    ScrollToLatest,

    /// Issue the relay call for this message text
    CallRelay { message: String },
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            message: Message::user(text),
        }
    }

    pub fn append_bot(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            message: Message::bot(text),
        }
    }
}
