//! Response resolution across the fallback tiers.
//!
//! Resolution is pure: it reads a snapshot and never performs I/O. The order is
//!
//! 1. requested name in the canned table
//! 2. requested name in the domain table
//! 3. `utter_default_response` in the canned table
//! 4. `utter_default_response` in the domain table
//! 5. the built-in default text
//!
//! so every call produces a non-empty message.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt;

use super::response_table::{ResponseTable, ResponseVariant};
use super::snapshot::CacheSnapshot;
use super::template::{render_variant, TemplateValues};
use super::tracker::Tracker;

/// Response consulted when the requested one cannot be produced.
pub const DEFAULT_RESPONSE_NAME: &str = "utter_default_response";

/// Last-resort reply when neither source has a usable default response.
pub const DEFAULT_RESPONSE_TEXT: &str = "Sorry, I didn't understand that.";

/// Where a resolved message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    Canned,
    Domain,
    CannedDefault,
    DomainDefault,
    BuiltIn,
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResolutionTier::Canned => "canned",
            ResolutionTier::Domain => "domain",
            ResolutionTier::CannedDefault => "canned default",
            ResolutionTier::DomainDefault => "domain default",
            ResolutionTier::BuiltIn => "built-in default",
        };
        write!(f, "{}", s)
    }
}

/// Everything needed to produce one bot message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionRequest {
    /// Name of the requested response, e.g. `utter_greet`.
    pub response: String,
    /// Extra template arguments supplied by the engine.
    pub arguments: Map<String, Value>,
    pub sender_id: String,
    /// Tracker events used to reconstruct slot values.
    pub events: Vec<Value>,
    /// Output channel name, used to pick channel-specific variants.
    pub channel: Option<String>,
}

/// A resolved message and the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub message: Value,
    pub tier: ResolutionTier,
}

impl Resolution {
    pub fn built_in() -> Self {
        Self {
            message: json!({ "text": DEFAULT_RESPONSE_TEXT }),
            tier: ResolutionTier::BuiltIn,
        }
    }
}

/// Resolves a request against a snapshot. Without a snapshot only the
/// built-in default is available.
pub fn resolve(snapshot: Option<&CacheSnapshot>, request: &ResolutionRequest) -> Resolution {
    let Some(snapshot) = snapshot else {
        return Resolution::built_in();
    };

    let tracker = Tracker::from_events(
        request.sender_id.clone(),
        &request.events,
        &snapshot.domain.initial_slots(),
    );
    let values = TemplateValues::new(&tracker.slots, &request.arguments);
    let channel = request.channel.as_deref();

    let tiers: [(&ResponseTable, &str, ResolutionTier); 4] = [
        (&snapshot.canned, request.response.as_str(), ResolutionTier::Canned),
        (&snapshot.domain.responses, request.response.as_str(), ResolutionTier::Domain),
        (&snapshot.canned, DEFAULT_RESPONSE_NAME, ResolutionTier::CannedDefault),
        (&snapshot.domain.responses, DEFAULT_RESPONSE_NAME, ResolutionTier::DomainDefault),
    ];

    for (table, name, tier) in tiers {
        if let Some(variants) = table.get(name) {
            if let Some(message) = select_variant(variants, &tracker.slots, &values, channel) {
                return Resolution { message, tier };
            }
        }
    }

    Resolution::built_in()
}

/// Orders candidate variants by preference:
/// conditional variants whose conditions hold come first, then unconditional
/// ones; within each group variants for the requested channel come before
/// channel-less ones. Variants for other channels are never candidates.
pub fn candidate_variants<'a>(
    variants: &'a [ResponseVariant],
    slots: &HashMap<String, Value>,
    channel: Option<&str>,
) -> Vec<&'a ResponseVariant> {
    let for_channel = |v: &ResponseVariant| match v.channel() {
        None => true,
        Some(c) => Some(c) == channel,
    };
    let conditions_hold = |v: &ResponseVariant| {
        v.conditions()
            .iter()
            .all(|c| c.holds(slots.get(&c.name)))
    };

    let eligible: Vec<&ResponseVariant> = variants
        .iter()
        .filter(|v| for_channel(*v) && conditions_hold(*v))
        .collect();

    let group = |conditional: bool, channel_specific: bool| {
        eligible
            .iter()
            .copied()
            .filter(move |v| v.is_conditional() == conditional)
            .filter(move |v| v.channel().is_some() == channel_specific)
    };

    group(true, true)
        .chain(group(true, false))
        .chain(group(false, true))
        .chain(group(false, false))
        .collect()
}

/// Renders the first candidate that has all its placeholders resolved and
/// displays something.
fn select_variant(
    variants: &[ResponseVariant],
    slots: &HashMap<String, Value>,
    values: &TemplateValues,
    channel: Option<&str>,
) -> Option<Value> {
    candidate_variants(variants, slots, channel)
        .into_iter()
        .filter_map(|v| render_variant(v, values).ok())
        .find(ResponseVariant::has_content)
        .map(ResponseVariant::into_message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nlg::{CannedResponse, DomainDefinition};
    use proptest::prelude::*;
    use std::time::Instant;

    fn domain_from(value: Value) -> DomainDefinition {
        DomainDefinition::from_json(value).unwrap()
    }

    fn snapshot(canned: &[(&str, &str)], domain: Value) -> CacheSnapshot {
        let canned: Vec<CannedResponse> = canned
            .iter()
            .map(|(code, content)| CannedResponse {
                short_code: code.to_string(),
                content: content.to_string(),
            })
            .collect();
        CacheSnapshot::new(
            ResponseTable::from_canned(&canned),
            domain_from(domain),
            Instant::now(),
        )
    }

    fn request(name: &str) -> ResolutionRequest {
        ResolutionRequest {
            response: name.to_string(),
            sender_id: "user-1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn canned_response_wins_over_domain() {
        let snap = snapshot(
            &[("greet", "Hello from Chatwoot")],
            json!({"responses": {"utter_greet": [{"text": "Hello from Rasa"}]}}),
        );
        let resolution = resolve(Some(&snap), &request("utter_greet"));
        assert_eq!(resolution.tier, ResolutionTier::Canned);
        assert_eq!(resolution.message, json!({"text": "Hello from Chatwoot"}));
    }

    #[test]
    fn domain_response_used_when_not_canned() {
        let snap = snapshot(
            &[("other", "x")],
            json!({"responses": {"utter_greet": [{"text": "Hello from Rasa"}]}}),
        );
        let resolution = resolve(Some(&snap), &request("utter_greet"));
        assert_eq!(resolution.tier, ResolutionTier::Domain);
        assert_eq!(resolution.message, json!({"text": "Hello from Rasa"}));
    }

    #[test]
    fn canned_default_then_domain_default() {
        let snap = snapshot(
            &[("default_response", "Canned fallback")],
            json!({"responses": {"utter_default_response": [{"text": "Domain fallback"}]}}),
        );
        let resolution = resolve(Some(&snap), &request("utter_unknown"));
        assert_eq!(resolution.tier, ResolutionTier::CannedDefault);
        assert_eq!(resolution.message, json!({"text": "Canned fallback"}));

        let snap = snapshot(
            &[("other", "x")],
            json!({"responses": {"utter_default_response": [{"text": "Domain fallback"}]}}),
        );
        let resolution = resolve(Some(&snap), &request("utter_unknown"));
        assert_eq!(resolution.tier, ResolutionTier::DomainDefault);
    }

    #[test]
    fn built_in_default_when_nothing_matches() {
        let snap = snapshot(&[("other", "x")], json!({"responses": {"utter_x": [{"text": "x"}]}}));
        let resolution = resolve(Some(&snap), &request("utter_unknown"));
        assert_eq!(resolution, Resolution::built_in());
        assert_eq!(resolution.message, json!({"text": DEFAULT_RESPONSE_TEXT}));
    }

    #[test]
    fn built_in_default_without_snapshot() {
        assert_eq!(resolve(None, &request("utter_greet")), Resolution::built_in());
    }

    #[test]
    fn slots_from_events_fill_placeholders() {
        let snap = snapshot(
            &[("greet", "Hi {name}")],
            json!({"responses": {"utter_x": [{"text": "x"}]}}),
        );
        let mut req = request("utter_greet");
        req.events = vec![json!({"event": "slot", "name": "name", "value": "Ada"})];
        let resolution = resolve(Some(&snap), &req);
        assert_eq!(resolution.message, json!({"text": "Hi Ada"}));
    }

    #[test]
    fn unresolved_placeholder_falls_through_to_next_tier() {
        let snap = snapshot(
            &[("greet", "Hi {name}")],
            json!({"responses": {"utter_greet": [{"text": "Hello there"}]}}),
        );
        let resolution = resolve(Some(&snap), &request("utter_greet"));
        assert_eq!(resolution.tier, ResolutionTier::Domain);
        assert_eq!(resolution.message, json!({"text": "Hello there"}));
    }

    #[test]
    fn arguments_fill_placeholders() {
        let snap = snapshot(
            &[("order", "Order {order_id} shipped")],
            json!({"responses": {"utter_x": [{"text": "x"}]}}),
        );
        let mut req = request("utter_order");
        req.arguments.insert("order_id".to_string(), json!(1234));
        let resolution = resolve(Some(&snap), &req);
        assert_eq!(resolution.message, json!({"text": "Order 1234 shipped"}));
    }

    #[test]
    fn domain_initial_slot_values_are_used() {
        let snap = snapshot(
            &[("x", "x")],
            json!({
                "slots": {"plan": {"initial_value": "basic"}},
                "responses": {"utter_plan": [{"text": "Plan: {plan}"}]}
            }),
        );
        let resolution = resolve(Some(&snap), &request("utter_plan"));
        assert_eq!(resolution.message, json!({"text": "Plan: basic"}));
    }

    #[test]
    fn channel_specific_variant_is_preferred() {
        let snap = snapshot(
            &[("x", "x")],
            json!({"responses": {"utter_hi": [
                {"text": "generic"},
                {"text": "for chatwoot", "channel": "chatwoot"},
                {"text": "for slack", "channel": "slack"}
            ]}}),
        );
        let mut req = request("utter_hi");
        req.channel = Some("chatwoot".to_string());
        assert_eq!(resolve(Some(&snap), &req).message, json!({"text": "for chatwoot"}));

        req.channel = Some("rest".to_string());
        assert_eq!(resolve(Some(&snap), &req).message, json!({"text": "generic"}));
    }

    #[test]
    fn matching_conditional_variant_is_preferred() {
        let snap = snapshot(
            &[("x", "x")],
            json!({"responses": {"utter_hi": [
                {"text": "hello"},
                {"text": "hello vip", "condition": [{"type": "slot", "name": "vip", "value": true}]}
            ]}}),
        );
        let mut req = request("utter_hi");
        assert_eq!(resolve(Some(&snap), &req).message, json!({"text": "hello"}));

        req.events = vec![json!({"event": "slot", "name": "vip", "value": true})];
        assert_eq!(resolve(Some(&snap), &req).message, json!({"text": "hello vip"}));
    }

    #[test]
    fn variant_without_content_is_skipped() {
        let snap = snapshot(
            &[("x", "x")],
            json!({"responses": {
                "utter_empty": [{"text": ""}],
                "utter_default_response": [{"text": "fallback"}]
            }}),
        );
        let resolution = resolve(Some(&snap), &request("utter_empty"));
        assert_eq!(resolution.tier, ResolutionTier::DomainDefault);
    }

    proptest! {
        #[test]
        fn resolution_is_total(
            name in "[a-z_]{0,20}",
            slot in "[a-z]{1,8}",
            value in proptest::option::of("[a-zA-Z ]{0,10}"),
        ) {
            let snap = snapshot(
                &[("greet", "Hi {name}")],
                json!({"responses": {"utter_greet": [{"text": "{other}"}]}}),
            );
            let mut req = request(&name);
            if let Some(value) = value {
                req.events = vec![json!({"event": "slot", "name": slot, "value": value})];
            }
            for snapshot in [None, Some(&snap)] {
                let resolution = resolve(snapshot, &req);
                let text = resolution.message.get("text").and_then(Value::as_str).unwrap_or("");
                prop_assert!(!text.trim().is_empty());
            }
        }
    }
}
