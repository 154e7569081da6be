//! Wire types of the engine's custom action protocol.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::domain::foundation::ConversationRef;

/// Body of `POST /webhook` sent by the engine to run an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: ActionTracker,
    #[serde(default)]
    pub domain: Value,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionTracker {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: Map<String, Value>,
    #[serde(default)]
    pub latest_message: LatestMessage,
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ActionCall {
    /// Name of the intent of the latest user message, fallback intents included.
    pub fn latest_intent(&self) -> Option<&str> {
        self.tracker
            .latest_message
            .intent
            .as_ref()
            .and_then(|i| i.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Chatwoot conversation the latest message came from, when its metadata
    /// carries both identifiers.
    pub fn conversation(&self) -> Option<ConversationRef> {
        self.tracker
            .latest_message
            .metadata
            .as_ref()
            .and_then(ConversationRef::from_metadata)
    }
}

/// Result of a successful action run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub events: Vec<Value>,
    pub responses: Vec<Value>,
}

impl ActionResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a literal text message.
    pub fn utter_text(&mut self, text: impl Into<String>) {
        self.responses.push(json!({ "text": text.into() }));
    }

    /// Queues a named response for the engine to generate.
    pub fn utter_response(&mut self, name: impl Into<String>) {
        self.responses.push(json!({ "response": name.into() }));
    }

    pub fn merge(&mut self, other: ActionResponse) {
        self.events.extend(other.events);
        self.responses.extend(other.responses);
    }
}
