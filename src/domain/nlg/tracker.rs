//! Conversation tracker reconstructed from the engine's event history.

use serde_json::Value;
use std::collections::HashMap;

/// Slot state of one conversation, as needed for template rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracker {
    pub sender_id: String,
    pub slots: HashMap<String, Value>,
}

impl Tracker {
    /// Replays `events` on top of the domain's initial slot values.
    ///
    /// - `slot` events set a single slot; when the domain declares slots,
    ///   events for undeclared slots are dropped
    /// - `restart`, `session_started` and `reset_slots` events return every
    ///   slot to its initial value
    ///
    /// All other events are ignored.
    pub fn from_events(
        sender_id: impl Into<String>,
        events: &[Value],
        initial_slots: &HashMap<String, Value>,
    ) -> Self {
        let mut slots = initial_slots.clone();
        let declared_only = !initial_slots.is_empty();

        for event in events {
            match event.get("event").and_then(Value::as_str) {
                Some("slot") => {
                    let Some(name) = event.get("name").and_then(Value::as_str) else {
                        continue;
                    };
                    if declared_only && !initial_slots.contains_key(name) {
                        continue;
                    }
                    let value = event.get("value").cloned().unwrap_or(Value::Null);
                    slots.insert(name.to_string(), value);
                }
                Some("restart") | Some("session_started") | Some("reset_slots") => {
                    slots = initial_slots.clone();
                }
                _ => {}
            }
        }

        Self {
            sender_id: sender_id.into(),
            slots,
        }
    }

    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }
}
