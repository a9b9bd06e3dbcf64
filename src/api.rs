//! HTTP API for the relay endpoint

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::llm::CompletionService;
use std::sync::Arc;

/// Application state shared across handlers
///
/// `llm` is `None` when no credential is configured at startup; `/chat`
/// then degrades into the generic downstream-failure response while
/// `/health` keeps answering.
#[derive(Clone)]
pub struct AppState {
    pub llm: Option<Arc<dyn CompletionService>>,
}

impl AppState {
    pub fn new(llm: Option<Arc<dyn CompletionService>>) -> Self {
        Self { llm }
    }
}
