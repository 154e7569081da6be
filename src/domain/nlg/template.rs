//! Placeholder substitution for response variants.
//!
//! Placeholders use the `{name}` form; `{{` and `}}` produce literal braces.
//! A placeholder with no value (missing or null) makes the whole variant
//! unrenderable so the resolver can fall through to the next tier.

use serde_json::{Map, Value};
use std::collections::HashMap;

use super::errors::TemplateError;
use super::response_table::ResponseVariant;

/// Values available to templates: tracker slots overlaid with call arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateValues {
    values: HashMap<String, Value>,
}

impl TemplateValues {
    /// Arguments take precedence over slots of the same name.
    pub fn new(slots: &HashMap<String, Value>, arguments: &Map<String, Value>) -> Self {
        let mut values = slots.clone();
        for (key, value) in arguments {
            values.insert(key.clone(), value.clone());
        }
        Self { values }
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Text form of a value, or `None` when the value is absent or null.
    pub fn lookup(&self, name: &str) -> Option<String> {
        match self.values.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Substitutes every placeholder in `template`.
pub fn render_str(template: &str, values: &TemplateValues) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                if !closed {
                    return Err(TemplateError::Unterminated);
                }
                let key = name.trim();
                let value = values
                    .lookup(key)
                    .ok_or_else(|| TemplateError::MissingValue(key.to_string()))?;
                out.push_str(&value);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// Renders every string inside a JSON value, recursing into arrays and objects.
fn render_value(value: &Value, values: &TemplateValues) -> Result<Value, TemplateError> {
    Ok(match value {
        Value::String(s) => Value::String(render_str(s, values)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| render_value(item, values))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| Ok((k.clone(), render_value(v, values)?)))
                .collect::<Result<_, TemplateError>>()?,
        ),
        other => other.clone(),
    })
}

/// Keys whose content is rendered. `buttons` and `custom` are rendered deeply.
const RENDERED_KEYS: [&str; 5] = ["text", "image", "buttons", "custom", "attachment"];

/// Renders a variant. Returns the error of the first unresolvable placeholder.
pub fn render_variant(
    variant: &ResponseVariant,
    values: &TemplateValues,
) -> Result<ResponseVariant, TemplateError> {
    let mut fields = Map::new();
    for (key, value) in variant.fields() {
        let rendered = if RENDERED_KEYS.contains(&key.as_str()) {
            render_value(value, values)?
        } else {
            value.clone()
        };
        fields.insert(key.clone(), rendered);
    }
    Ok(ResponseVariant::new(fields))
}
