use super::models::ChatMessage;
use anyhow::Result;
use async_trait::async_trait;

/// Hosted chat model. Mockable for testing.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the full message list and return the model's reply text.
    async fn send_conversation_turn(&self, messages: &[ChatMessage]) -> Result<String>;
}
