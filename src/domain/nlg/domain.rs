//! Dialogue-engine domain definition (responses and slots).

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::errors::NlgError;
use super::response_table::{ResponseTable, ResponseVariant};

/// A slot declared in the engine domain. Only the initial value matters for
/// template rendering.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SlotDefinition {
    #[serde(default)]
    pub initial_value: Value,
}

/// The parts of the engine domain used to render responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainDefinition {
    pub responses: ResponseTable,
    pub slots: HashMap<String, SlotDefinition>,
}

/// Raw wire shape of the domain; `templates` is the pre-2.0 name of `responses`.
#[derive(Debug, Default, Deserialize)]
struct RawDomain {
    #[serde(default)]
    responses: Option<HashMap<String, Vec<ResponseVariant>>>,
    #[serde(default)]
    templates: Option<HashMap<String, Vec<ResponseVariant>>>,
    #[serde(default)]
    slots: Option<HashMap<String, Option<SlotDefinition>>>,
}

impl DomainDefinition {
    /// Parses the JSON served by the engine's `/domain` endpoint.
    pub fn from_json(value: Value) -> Result<Self, NlgError> {
        let raw: RawDomain = serde_json::from_value(value)
            .map_err(|e| NlgError::invalid_domain(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    /// Parses a `domain.yml` file's content.
    pub fn from_yaml(content: &str) -> Result<Self, NlgError> {
        let raw: RawDomain = serde_yaml::from_str::<Option<RawDomain>>(content)
            .map_err(|e| NlgError::invalid_domain(e.to_string()))?
            .unwrap_or_default();
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawDomain) -> Self {
        let responses = raw.responses.or(raw.templates).unwrap_or_default();
        let slots = raw
            .slots
            .unwrap_or_default()
            .into_iter()
            .map(|(name, definition)| (name, definition.unwrap_or_default()))
            .collect();
        Self {
            responses: ResponseTable::new(responses),
            slots,
        }
    }

    /// Initial slot values declared in the domain.
    pub fn initial_slots(&self) -> HashMap<String, Value> {
        self.slots
            .iter()
            .map(|(name, definition)| (name.clone(), definition.initial_value.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_reads_responses_and_slots() {
        let domain = DomainDefinition::from_json(json!({
            "version": "3.1",
            "responses": {
                "utter_greet": [{"text": "Hi {name}!"}, {"text": "Hello!"}]
            },
            "slots": {
                "name": {"type": "text", "initial_value": null},
                "tier": {"type": "categorical", "initial_value": "free"}
            }
        }))
        .unwrap();

        assert_eq!(domain.responses.get("utter_greet").unwrap().len(), 2);
        assert_eq!(domain.initial_slots().get("tier"), Some(&json!("free")));
        assert_eq!(domain.initial_slots().get("name"), Some(&Value::Null));
    }

    #[test]
    fn from_json_accepts_legacy_templates_key() {
        let domain = DomainDefinition::from_json(json!({
            "templates": {"utter_bye": [{"text": "Bye"}]}
        }))
        .unwrap();
        assert!(domain.responses.contains("utter_bye"));
    }

    #[test]
    fn from_yaml_reads_domain_file() {
        let yaml = r#"
version: "3.1"
slots:
  plan:
    type: text
    initial_value: basic
    mappings: []
responses:
  utter_default_response:
    - text: "I am not sure."
  utter_plan:
    - text: "Your plan is {plan}"
      channel: chatwoot
"#;
        let domain = DomainDefinition::from_yaml(yaml).unwrap();
        assert!(domain.responses.contains("utter_default_response"));
        assert_eq!(
            domain.responses.get("utter_plan").unwrap()[0].channel(),
            Some("chatwoot")
        );
        assert_eq!(domain.initial_slots().get("plan"), Some(&json!("basic")));
    }

    #[test]
    fn from_yaml_empty_document_is_empty_domain() {
        let domain = DomainDefinition::from_yaml("").unwrap();
        assert!(domain.is_empty());
    }

    #[test]
    fn from_json_rejects_malformed_responses() {
        let result = DomainDefinition::from_json(json!({"responses": ["not", "a", "map"]}));
        assert!(matches!(result, Err(NlgError::InvalidDomain(_))));
    }

    #[test]
    fn slot_without_definition_body_defaults_to_null() {
        let domain = DomainDefinition::from_yaml("slots:\n  bare:\n").unwrap();
        assert_eq!(domain.initial_slots().get("bare"), Some(&Value::Null));
    }
}
