//! Response tables - named, ordered lists of response variants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Keys of a variant that steer selection and never reach the client.
const SELECTION_KEYS: [&str; 2] = ["channel", "condition"];

/// Keys that carry something a channel can display.
const CONTENT_KEYS: [&str; 6] = ["text", "image", "buttons", "custom", "attachment", "elements"];

/// A canned response as authored in the Chatwoot UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CannedResponse {
    pub short_code: String,
    pub content: String,
}

/// One variant of a response: a JSON object with at least a `text` field in
/// the common case, optionally `buttons`, `image`, `custom`, `attachment`,
/// plus the selection keys `channel` and `condition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseVariant(Map<String, Value>);

impl ResponseVariant {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// A variant holding only a text.
    pub fn text(text: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("text".to_string(), Value::String(text.into()));
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The channel this variant is restricted to, if any.
    pub fn channel(&self) -> Option<&str> {
        self.0.get("channel").and_then(Value::as_str)
    }

    /// Slot conditions attached to this variant; empty when unconditional.
    pub fn conditions(&self) -> Vec<SlotCondition> {
        self.0
            .get("condition")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_conditional(&self) -> bool {
        !self.conditions().is_empty()
    }

    /// True when at least one displayable field holds a non-empty value.
    pub fn has_content(&self) -> bool {
        CONTENT_KEYS.iter().any(|key| match self.0.get(*key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(fields)) => !fields.is_empty(),
            Some(_) => true,
        })
    }

    /// Converts the variant into the message returned to the engine, with the
    /// selection keys removed.
    pub fn into_message(self) -> Value {
        let mut fields = self.0;
        for key in SELECTION_KEYS {
            fields.remove(key);
        }
        Value::Object(fields)
    }
}

/// A `{type: "slot", name, value}` entry of a variant's `condition` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotCondition {
    #[serde(rename = "type", default = "default_condition_type")]
    pub condition_type: String,
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

fn default_condition_type() -> String {
    "slot".to_string()
}

impl SlotCondition {
    /// Evaluates the condition against a slot lookup. Conditions of any type
    /// other than `slot` never hold.
    pub fn holds(&self, slot_value: Option<&Value>) -> bool {
        if self.condition_type != "slot" {
            return false;
        }
        slot_value.unwrap_or(&Value::Null) == &self.value
    }
}

/// Immutable mapping from response name to ordered variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseTable {
    responses: HashMap<String, Vec<ResponseVariant>>,
}

impl ResponseTable {
    pub fn new(responses: HashMap<String, Vec<ResponseVariant>>) -> Self {
        Self { responses }
    }

    /// Builds the canned table: each canned response becomes
    /// `utter_{short_code}` with a single text variant. Later duplicates of a
    /// short code replace earlier ones.
    pub fn from_canned(canned: &[CannedResponse]) -> Self {
        let responses = canned
            .iter()
            .map(|r| {
                (
                    format!("utter_{}", r.short_code),
                    vec![ResponseVariant::text(r.content.clone())],
                )
            })
            .collect();
        Self { responses }
    }

    pub fn get(&self, name: &str) -> Option<&[ResponseVariant]> {
        self.responses.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.responses.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.responses.keys().map(String::as_str)
    }
}
