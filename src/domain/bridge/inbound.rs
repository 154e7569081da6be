//! Inbound Chatwoot webhook events and the messages they produce.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::foundation::{nested_id, ConversationRef};

/// Name of this input channel as seen by the engine.
pub const INPUT_CHANNEL: &str = "chatwoot";

/// User text that restarts the conversation.
pub const RESTART_COMMAND: &str = "/restart";

/// Synthetic message sent after a restart to open a fresh dialogue.
pub const START_COMMAND: &str = "/start";

/// Webhook payload posted by Chatwoot. Only the fields the bridge reads are
/// modelled; everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sender: Option<Value>,
    #[serde(default)]
    pub conversation: Option<Value>,
    #[serde(default)]
    pub account: Option<Value>,
}

/// Reasons an inbound event is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEventError {
    #[error("message_type is {0:?}, expected \"incoming\"")]
    NotIncoming(Option<String>),

    #[error("event is {0:?}, expected \"message_created\"")]
    NotMessageCreated(Option<String>),

    #[error("conversation status is {0:?}, expected \"pending\"")]
    NotPending(Option<String>),

    #[error("event has no sender id")]
    MissingSender,

    #[error("incomplete conversation identity (account id present: {account}, conversation id present: {conversation})")]
    MissingIdentity { account: bool, conversation: bool },

    #[error("event has no text content")]
    MissingContent,
}

impl InboundEvent {
    pub fn conversation_status(&self) -> Option<&str> {
        self.conversation
            .as_ref()
            .and_then(|c| c.get("status"))
            .and_then(Value::as_str)
    }

    /// Checks that the event is a new incoming message in a pending (bot
    /// handled) conversation and carries a complete identity.
    ///
    /// A conversation with only one of account id / conversation id is
    /// rejected rather than routed partially.
    pub fn validate(&self) -> Result<ValidatedEvent, InvalidEventError> {
        if self.message_type.as_deref() != Some("incoming") {
            return Err(InvalidEventError::NotIncoming(self.message_type.clone()));
        }
        if self.event.as_deref() != Some("message_created") {
            return Err(InvalidEventError::NotMessageCreated(self.event.clone()));
        }
        if self.conversation_status() != Some("pending") {
            return Err(InvalidEventError::NotPending(
                self.conversation_status().map(str::to_string),
            ));
        }

        let sender_id = nested_id(self.sender.as_ref()).ok_or(InvalidEventError::MissingSender)?;

        let account_id = nested_id(self.account.as_ref());
        let conversation_id = nested_id(self.conversation.as_ref());
        let conversation = match (account_id, conversation_id) {
            (Some(account_id), Some(conversation_id)) => {
                ConversationRef::new(account_id, conversation_id)
            }
            (account_id, conversation_id) => {
                return Err(InvalidEventError::MissingIdentity {
                    account: account_id.is_some(),
                    conversation: conversation_id.is_some(),
                })
            }
        };

        let content = self
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or(InvalidEventError::MissingContent)?
            .to_string();

        Ok(ValidatedEvent {
            conversation,
            sender_id,
            content,
            metadata: json!({
                "conversation": self.conversation.clone().unwrap_or(Value::Null),
                "account": self.account.clone().unwrap_or(Value::Null),
            }),
        })
    }
}

/// An inbound event that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvent {
    pub conversation: ConversationRef,
    pub sender_id: String,
    pub content: String,
    /// Raw `conversation` and `account` objects, forwarded to the engine.
    pub metadata: Value,
}

impl ValidatedEvent {
    pub fn is_restart(&self) -> bool {
        self.content == RESTART_COMMAND
    }

    /// Messages to dispatch to the engine, in order.
    ///
    /// A restart yields the restart command followed by a synthetic start
    /// message with the same sender and metadata.
    pub fn messages(&self) -> Vec<UserMessage> {
        if self.is_restart() {
            vec![
                self.message(RESTART_COMMAND),
                self.message(START_COMMAND),
            ]
        } else {
            vec![self.message(&self.content)]
        }
    }

    fn message(&self, text: &str) -> UserMessage {
        UserMessage {
            text: text.to_string(),
            sender_id: self.sender_id.clone(),
            input_channel: INPUT_CHANNEL.to_string(),
            metadata: self.metadata.clone(),
        }
    }
}

/// A user message handed to the dialogue engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub text: String,
    pub sender_id: String,
    pub input_channel: String,
    pub metadata: Value,
}
