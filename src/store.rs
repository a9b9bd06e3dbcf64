//! Conversation Store
//!
//! Client-side owner of message history, submission flow, and persistence.
//! The pure transition logic lives in [`crate::state_machine`]; this module
//! drives it and executes its effects against injected capabilities.

mod history;
mod relay;
mod traits;

#[cfg(test)]
pub mod testing;

pub use history::FileHistory;
pub use relay::HttpRelayClient;
pub use traits::{HistoryStore, NullView, RelayClient, RelayError, ViewSink};

use crate::state_machine::{transition, ConvState, Effect, Event, Message, TransitionError};

/// Client-side conversation state and its drivers
///
/// Holds `&mut self` across the relay await, so submissions cannot
/// interleave within one store; the state machine additionally rejects a
/// second submit while one is in flight.
pub struct ConversationStore<H: HistoryStore, R: RelayClient> {
    state: ConvState,
    messages: Vec<Message>,
    draft: String,
    history: H,
    relay: R,
    view: Box<dyn ViewSink>,
}

impl<H: HistoryStore, R: RelayClient> ConversationStore<H, R> {
    pub fn new(history: H, relay: R) -> Self {
        Self {
            state: ConvState::Idle,
            messages: Vec::new(),
            draft: String::new(),
            history,
            relay,
            view: Box::new(NullView),
        }
    }

    /// Attach a view to receive scroll-to-latest requests
    pub fn with_view(mut self, view: impl ViewSink + 'static) -> Self {
        self.view = Box::new(view);
        self
    }

    /// Load persisted history, if any
    ///
    /// Absent, unreadable, or malformed data all yield an empty history;
    /// none of them is surfaced to the user.
    pub fn restore(&mut self) {
        let raw = match self.history.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted history");
                return;
            }
        };

        match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(messages) => self.messages = messages,
            Err(e) => {
                tracing::warn!(error = %e, "persisted history is malformed, starting empty");
            }
        }
    }

    /// Submit one user message and await its settlement
    ///
    /// Appends the user message immediately, issues the relay call, and
    /// appends exactly one bot message once the call settles — the reply
    /// text on success, the fixed fallback text on any failure. The return
    /// to idle is unconditional.
    ///
    /// Whitespace-only input and submissions while a request is in flight
    /// are rejected without touching any state.
    pub async fn submit(&mut self, text: &str) -> Result<(), TransitionError> {
        let result = transition(
            self.state,
            Event::Submit {
                text: text.to_string(),
            },
        )?;
        self.state = result.new_state;
        let call = self.run_effects(result.effects);

        let Some(message) = call else {
            return Ok(());
        };

        let event = match self.relay.send(&message).await {
            Ok(reply) => Event::RelayReply { text: reply },
            Err(e) => {
                tracing::warn!(error = %e, "relay request failed");
                Event::RelayFailed {
                    message: e.to_string(),
                }
            }
        };

        match transition(self.state, event) {
            Ok(settled) => {
                self.state = settled.new_state;
                self.run_effects(settled.effects);
            }
            Err(e) => {
                // Cannot happen from Sending; the reset to idle stays
                // unconditional regardless.
                tracing::error!(error = %e, "settle transition rejected, forcing idle");
                self.state = ConvState::Idle;
            }
        }

        Ok(())
    }

    /// The uncommitted input text
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Drop all messages and the persisted history
    pub fn clear(&mut self) {
        self.messages.clear();
        if let Err(e) = self.history.clear() {
            tracing::warn!(error = %e, "failed to clear persisted history");
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True exactly while a relay call is in flight
    pub fn pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn state(&self) -> ConvState {
        self.state
    }

    /// Execute transition effects; returns the relay message to send, if any
    fn run_effects(&mut self, effects: Vec<Effect>) -> Option<String> {
        let mut call = None;
        for effect in effects {
            match effect {
                Effect::AppendMessage { message } => self.messages.push(message),
                Effect::ClearDraft => self.draft.clear(),
                Effect::PersistHistory => self.persist(),
                Effect::ScrollToLatest => self.view.scroll_to_latest(&self.messages),
                Effect::CallRelay { message } => call = Some(message),
            }
        }
        call
    }

    /// Serialize the full ordered history, overwriting any prior value
    fn persist(&self) {
        let raw = match serde_json::to_string(&self.messages) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize history");
                return;
            }
        };
        if let Err(e) = self.history.save(&raw) {
            tracing::warn!(error = %e, "failed to persist history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{MemoryHistory, MockRelayClient, RecordingView};
    use super::*;
    use crate::state_machine::{Sender, FALLBACK_REPLY};

    fn store(
        history: MemoryHistory,
        relay: MockRelayClient,
    ) -> ConversationStore<MemoryHistory, MockRelayClient> {
        ConversationStore::new(history, relay)
    }

    #[tokio::test]
    async fn test_submit_appends_user_then_bot() {
        let history = MemoryHistory::default();
        let relay = MockRelayClient::default();
        relay.queue_reply("Hi!");

        let mut store = store(history.clone(), relay.clone());
        store.submit("Hello").await.unwrap();

        assert_eq!(store.messages(), &[Message::user("Hello"), Message::bot("Hi!")]);
        assert!(!store.pending());
        assert_eq!(relay.recorded_requests(), vec!["Hello".to_string()]);

        // Both messages persisted, in order
        let raw = history.load().unwrap().unwrap();
        let persisted: Vec<Message> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, store.messages());
    }

    #[tokio::test]
    async fn test_submit_trims_input() {
        let relay = MockRelayClient::default();
        relay.queue_reply("ok");

        let mut store = store(MemoryHistory::default(), relay.clone());
        store.submit("  padded  ").await.unwrap();

        assert_eq!(store.messages()[0], Message::user("padded"));
        assert_eq!(relay.recorded_requests(), vec!["padded".to_string()]);
    }

    #[tokio::test]
    async fn test_whitespace_submit_is_noop() {
        let history = MemoryHistory::default();
        let relay = MockRelayClient::default();

        let mut store = store(history.clone(), relay.clone());
        let result = store.submit("   \t").await;

        assert!(matches!(result, Err(TransitionError::EmptyDraft)));
        assert!(store.messages().is_empty());
        assert!(relay.recorded_requests().is_empty());
        assert!(history.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_relay_failure_appends_fallback() {
        let relay = MockRelayClient::default();
        relay.queue_error(RelayError::Network("connection refused".to_string()));

        let mut store = store(MemoryHistory::default(), relay);
        store.submit("Hello").await.unwrap();

        assert_eq!(store.messages().len(), 2);
        assert_eq!(store.messages()[1].sender, Sender::Bot);
        assert_eq!(store.messages()[1].text, FALLBACK_REPLY);
        assert!(!store.pending());
    }

    #[tokio::test]
    async fn test_submit_clears_draft() {
        let relay = MockRelayClient::default();
        relay.queue_reply("ok");

        let mut store = store(MemoryHistory::default(), relay);
        store.set_draft("Hello");
        let text = store.draft().to_string();
        store.submit(&text).await.unwrap();

        assert!(store.draft().is_empty());
    }

    #[tokio::test]
    async fn test_restore_round_trips_history() {
        let history = MemoryHistory::default();
        let relay = MockRelayClient::default();
        relay.queue_reply("Hi!");
        relay.queue_reply("Good, you?");

        let mut first = store(history.clone(), relay.clone());
        first.submit("Hello").await.unwrap();
        first.submit("How are you?").await.unwrap();
        let expected = first.messages().to_vec();
        drop(first);

        let mut second = store(history, relay);
        second.restore();
        assert_eq!(second.messages(), expected.as_slice());
    }

    #[tokio::test]
    async fn test_restore_treats_malformed_history_as_empty() {
        let history = MemoryHistory::seeded("{not json");
        let mut store = store(history, MockRelayClient::default());
        store.restore();
        assert!(store.messages().is_empty());
    }

    #[tokio::test]
    async fn test_restore_with_no_history_is_empty() {
        let mut store = store(MemoryHistory::default(), MockRelayClient::default());
        store.restore();
        assert!(store.messages().is_empty());
    }

    #[tokio::test]
    async fn test_view_scrolls_on_every_mutation() {
        let view = RecordingView::default();
        let relay = MockRelayClient::default();
        relay.queue_reply("Hi!");

        let mut store =
            store(MemoryHistory::default(), relay).with_view(view.clone());
        store.submit("Hello").await.unwrap();

        // One scroll for the user append, one for the bot append, each
        // observing the newest entry.
        assert_eq!(view.scroll_counts(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_clear_drops_messages_and_storage() {
        let history = MemoryHistory::default();
        let relay = MockRelayClient::default();
        relay.queue_reply("Hi!");

        let mut store = store(history.clone(), relay);
        store.submit("Hello").await.unwrap();
        store.clear();

        assert!(store.messages().is_empty());
        assert!(history.load().unwrap().is_none());
    }
}
