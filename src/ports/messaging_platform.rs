//! Messaging Platform Port - Chatwoot operations used by the bridge and actions.

use async_trait::async_trait;

use crate::domain::bridge::ChatwootMessage;
use crate::domain::foundation::{ConversationRef, UpstreamError};
use crate::domain::nlg::CannedResponse;

/// Conversation operations on the messaging platform.
///
/// Calls are made once; callers decide how a failure is reported.
#[async_trait]
pub trait MessagingPlatform: Send + Sync {
    /// Posts a message into the conversation.
    async fn send_message(
        &self,
        conversation: &ConversationRef,
        message: &ChatwootMessage,
    ) -> Result<(), UpstreamError>;

    /// Shows the typing indicator in the conversation.
    async fn toggle_typing(&self, conversation: &ConversationRef) -> Result<(), UpstreamError>;

    /// Current labels of the conversation.
    async fn labels(&self, conversation: &ConversationRef) -> Result<Vec<String>, UpstreamError>;

    /// Replaces the labels of the conversation.
    async fn set_labels(
        &self,
        conversation: &ConversationRef,
        labels: &[String],
    ) -> Result<(), UpstreamError>;

    /// Sets the conversation status to `open`, handing it to human agents.
    async fn open_conversation(&self, conversation: &ConversationRef) -> Result<(), UpstreamError>;
}

/// Source of canned responses authored in the messaging platform.
#[async_trait]
pub trait CannedResponseSource: Send + Sync {
    async fn canned_responses(&self) -> Result<Vec<CannedResponse>, UpstreamError>;
}
