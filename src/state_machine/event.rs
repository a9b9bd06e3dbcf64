//! Events that can occur in a conversation

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// User submitted the draft input
    Submit { text: String },

    /// The relay answered with a bot reply
    RelayReply { text: String },

    /// The relay call failed (network, non-2xx status, malformed body).
    ///
    /// `message` is for logging only; the appended bot message is always
    /// the fixed fallback text.
    RelayFailed { message: String },
}
