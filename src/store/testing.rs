//! Mock implementations for testing
//!
//! These mocks enable store tests without real I/O.

use super::traits::{HistoryStore, RelayClient, RelayError, ViewSink};
use crate::state_machine::Message;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// ============================================================================
// Memory History
// ============================================================================

/// In-memory single-key history, shareable across store instances
#[derive(Clone, Default)]
pub struct MemoryHistory {
    value: Arc<Mutex<Option<String>>>,
}

impl MemoryHistory {
    /// Start with a pre-existing persisted value
    pub fn seeded(raw: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }
}

impl HistoryStore for MemoryHistory {
    fn load(&self) -> Result<Option<String>, String> {
        Ok(self.value.lock().unwrap().clone())
    }

    fn save(&self, raw: &str) -> Result<(), String> {
        *self.value.lock().unwrap() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        *self.value.lock().unwrap() = None;
        Ok(())
    }
}

// ============================================================================
// Mock Relay Client
// ============================================================================

#[derive(Default)]
struct MockRelayInner {
    replies: Mutex<VecDeque<Result<String, RelayError>>>,
    requests: Mutex<Vec<String>>,
}

/// Mock relay client that returns queued replies and records requests
#[derive(Clone, Default)]
pub struct MockRelayClient {
    inner: Arc<MockRelayInner>,
}

impl MockRelayClient {
    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.inner
            .replies
            .lock()
            .unwrap()
            .push_back(Ok(text.into()));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: RelayError) {
        self.inner.replies.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded request messages
    pub fn recorded_requests(&self) -> Vec<String> {
        self.inner.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayClient for MockRelayClient {
    async fn send(&self, message: &str) -> Result<String, RelayError> {
        self.inner
            .requests
            .lock()
            .unwrap()
            .push(message.to_string());
        self.inner
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RelayError::Network("no mock reply queued".to_string())))
    }
}

// ============================================================================
// Recording View
// ============================================================================

/// View sink recording the message count at every scroll request
#[derive(Clone, Default)]
pub struct RecordingView {
    scrolls: Arc<Mutex<Vec<usize>>>,
}

impl RecordingView {
    pub fn scroll_counts(&self) -> Vec<usize> {
        self.scrolls.lock().unwrap().clone()
    }
}

impl ViewSink for RecordingView {
    fn scroll_to_latest(&self, messages: &[Message]) {
        self.scrolls.lock().unwrap().push(messages.len());
    }
}
