pub mod chat_client;
pub mod chat_log;
pub mod llama;
pub mod types;

pub use chat_client::{ChatClient, ChatInput};
pub use chat_log::ChatLog;
pub use llama::LlamaClient;
pub use types::AiError;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

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

/// A language model reachable over some transport.
///
/// `LlamaClient` is the production implementation; tests substitute
/// canned models.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier sent with every request
    fn model_name(&self) -> &str;

    /// Answer an ordered conversation with the next assistant turn.
    async fn generate_text(&self, messages: Vec<Message>) -> Result<String, AiError>;

    /// Complete a single free-standing prompt.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}
