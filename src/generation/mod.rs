//! Text generation behind a capability interface.
//!
//! The engine never talks to a generation backend directly; it hands an
//! ordered conversation log to a [`Generator`] and gets text back, which
//! keeps the backend swappable for deterministic fakes in tests.

mod openai;

pub use openai::OpenAIGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a conversation log.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Trait for text-generation backends.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a reply to an ordered conversation log.
    async fn generate(&self, turns: &[ConversationTurn]) -> Result<String>;
}
