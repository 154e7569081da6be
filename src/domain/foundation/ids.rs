//! Identifiers of conversations on the messaging platform.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Reads an identifier that Chatwoot may send as a JSON number or string.
///
/// Empty strings, nulls and any other JSON type are treated as absent.
pub fn normalize_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Reads `object.id` from an optional JSON object.
pub fn nested_id(object: Option<&Value>) -> Option<String> {
    object.and_then(|o| o.get("id")).and_then(normalize_id)
}

/// Identity of one conversation on the messaging platform.
///
/// Both identifiers are required; a reference with only one of them is never
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationRef {
    pub account_id: String,
    pub conversation_id: String,
}

impl ConversationRef {
    pub fn new(account_id: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            conversation_id: conversation_id.into(),
        }
    }

    /// Recovers the conversation identity from message metadata of the shape
    /// `{"account": {"id": ..}, "conversation": {"id": ..}}`.
    ///
    /// Returns `None` unless both identifiers are present.
    pub fn from_metadata(metadata: &Value) -> Option<Self> {
        let account_id = nested_id(metadata.get("account"))?;
        let conversation_id = nested_id(metadata.get("conversation"))?;
        Some(Self {
            account_id,
            conversation_id,
        })
    }

    /// Chatwoot REST path of this conversation, relative to `/api/v1`.
    pub fn api_path(&self) -> String {
        format!(
            "/accounts/{}/conversations/{}",
            self.account_id, self.conversation_id
        )
    }
}

impl fmt::Display for ConversationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.account_id, self.conversation_id)
    }
}
