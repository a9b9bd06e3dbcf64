//! Fixed prompt and sampling configuration for the relay
//!
//! Every `/chat` request uses the same system instruction and sampling
//! parameters; nothing is accepted per-request.

/// System instruction prepended to every completion call
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Keep your responses concise and friendly.";

/// Sampling temperature for every completion call
pub const TEMPERATURE: f32 = 0.7;

/// Maximum output length for every completion call
pub const MAX_TOKENS: u32 = 150;
