//! Completion request and response types

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// One turn of a completion exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction, prepended as the first wire message
    pub system: String,
    pub messages: Vec<ChatTurn>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// The relay's shape: a fixed system instruction plus the sole user turn
    pub fn single_turn(
        system: impl Into<String>,
        user_text: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            system: system.into(),
            messages: vec![ChatTurn::user(user_text)],
            temperature,
            max_tokens,
        }
    }
}

/// A completion result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
