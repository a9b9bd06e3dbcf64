//! Trait abstractions for the store's I/O
//!
//! These traits enable testing the store with mock implementations.

use crate::state_machine::Message;
use async_trait::async_trait;
use thiserror::Error;

/// Storage for the persisted conversation history
///
/// A single-key get/set/clear surface; the store owns serialization and
/// treats anything unreadable as an empty history.
pub trait HistoryStore: Send + Sync {
    /// Read the raw persisted value, `None` if absent
    fn load(&self) -> Result<Option<String>, String>;

    /// Overwrite the persisted value
    fn save(&self, raw: &str) -> Result<(), String>;

    /// Remove the persisted value
    fn clear(&self) -> Result<(), String>;
}

/// Client for the relay's `/chat` route
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Exchange one user message for one bot reply
    async fn send(&self, message: &str) -> Result<String, RelayError>;
}

/// Failure reaching or understanding the relay
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("relay returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed relay response: {0}")]
    Malformed(String),
}

/// View notifications from the store
///
/// Called after every mutation of the message list so the display can
/// follow the newest entry.
pub trait ViewSink: Send + Sync {
    fn scroll_to_latest(&self, messages: &[Message]);
}

/// Default sink for headless use
pub struct NullView;

impl ViewSink for NullView {
    fn scroll_to_latest(&self, _messages: &[Message]) {}
}
