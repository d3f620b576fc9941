//! Advisor Client Interface
//!
//! The seam to whatever model host answers advisor prompts. The core
//! builds prompt text and parses freeform responses; transport, auth
//! and streaming live behind this trait in the host application.

use serde::{Deserialize, Serialize};

use crate::utils::error::AppResult;

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of an advisor conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// External advisor model boundary
pub trait AdvisorClient: Send + Sync {
    /// Single-shot completion for a standalone prompt
    fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Multi-turn completion over a conversation history
    fn send_message(&self, messages: &[ChatMessage]) -> AppResult<String>;
}
