//! Banter - minimal chat relay and conversation client
//!
//! A single-route HTTP relay that forwards one user message to an
//! OpenAI-compatible completion API, plus the client-side conversation
//! store that talks to it.

pub mod api;
pub mod llm;
pub mod prompt;
pub mod state_machine;
pub mod store;
