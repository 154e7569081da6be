//! Dialogue Engine Port - Forwarding user messages to Rasa.

use async_trait::async_trait;

use crate::domain::bridge::{BotMessage, UserMessage};
use crate::domain::foundation::UpstreamError;

#[async_trait]
pub trait DialogueEngine: Send + Sync {
    /// Sends one user message and returns the engine's replies in order.
    async fn handle_message(&self, message: &UserMessage) -> Result<Vec<BotMessage>, UpstreamError>;
}
