//! Engine replies and their translation into Chatwoot calls.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::custom_payload::{field_text, match_custom, media_group_text, media_text, CustomKind};

/// Separator between paragraphs that become separate chat messages.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Button attached to an engine reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    #[serde(default)]
    pub payload: String,
}

/// One reply produced by the engine's REST channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotMessage {
    #[serde(default)]
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub buttons: Option<Vec<Button>>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub attachment: Option<Value>,
    #[serde(default)]
    pub custom: Option<Value>,
}

impl BotMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Splits the reply into directives in relay order: text or buttons,
    /// then custom, then image, then attachment.
    pub fn directives(&self) -> Vec<OutboundDirective> {
        let mut directives = Vec::new();
        let text = self.text.clone().unwrap_or_default();

        match &self.buttons {
            Some(buttons) if !buttons.is_empty() => directives.push(OutboundDirective::Buttons {
                text,
                buttons: buttons.clone(),
            }),
            _ if !text.trim().is_empty() => directives.push(OutboundDirective::Text(text)),
            _ => {}
        }

        match &self.custom {
            Some(Value::Object(custom)) => directives.push(OutboundDirective::Custom(custom.clone())),
            Some(Value::Null) | None => {}
            Some(other) => directives.push(OutboundDirective::Text(other.to_string())),
        }

        if let Some(image) = self.image.as_deref().filter(|i| !i.trim().is_empty()) {
            directives.push(OutboundDirective::Media(image.to_string()));
        }

        match &self.attachment {
            Some(Value::String(url)) if !url.trim().is_empty() => {
                directives.push(OutboundDirective::Media(url.clone()))
            }
            Some(Value::Object(obj)) => {
                if let Some(url) = obj
                    .get("payload")
                    .and_then(|p| p.get("src").or_else(|| p.get("url")))
                    .or_else(|| obj.get("url"))
                    .and_then(Value::as_str)
                {
                    directives.push(OutboundDirective::Media(url.to_string()));
                }
            }
            _ => {}
        }

        directives
    }
}

/// What the bridge should relay for one piece of an engine reply.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundDirective {
    Text(String),
    Buttons { text: String, buttons: Vec<Button> },
    /// Image or attachment URL, relayed as text.
    Media(String),
    Custom(Map<String, Value>),
}

/// Item of an `input_select` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectItem {
    pub title: String,
    pub value: String,
}

/// Body of Chatwoot's create-message endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatwootMessage {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_attributes: Option<Value>,
    #[serde(default)]
    pub private: bool,
}

impl ChatwootMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: None,
            content_attributes: None,
            private: false,
        }
    }

    pub fn input_select(content: impl Into<String>, items: Vec<SelectItem>) -> Self {
        Self {
            content: content.into(),
            content_type: Some("input_select".to_string()),
            content_attributes: Some(json!({ "items": items })),
            private: false,
        }
    }
}

/// A single call to make against Chatwoot.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformAction {
    Send(ChatwootMessage),
    Typing,
}

/// Reasons a directive produces no platform call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropReason {
    #[error("custom payload matches no known message kind")]
    UnknownCustomPayload,

    #[error("custom payload kind '{0}' cannot be sent to Chatwoot")]
    UnsupportedKind(CustomKind),

    #[error("custom payload of kind '{0}' has no usable content")]
    EmptyContent(CustomKind),
}

impl OutboundDirective {
    /// Platform calls for this directive, in send order.
    pub fn to_actions(&self) -> Result<Vec<PlatformAction>, DropReason> {
        match self {
            OutboundDirective::Text(text) => Ok(split_paragraphs(text)
                .into_iter()
                .map(|part| PlatformAction::Send(ChatwootMessage::text(part)))
                .collect()),
            OutboundDirective::Buttons { text, buttons } => {
                let items = buttons
                    .iter()
                    .map(|b| SelectItem {
                        title: b.title.clone(),
                        value: b.payload.clone(),
                    })
                    .collect();
                Ok(vec![PlatformAction::Send(ChatwootMessage::input_select(
                    text.clone(),
                    items,
                ))])
            }
            OutboundDirective::Media(url) => {
                Ok(vec![PlatformAction::Send(ChatwootMessage::text(url.clone()))])
            }
            OutboundDirective::Custom(custom) => custom_actions(custom),
        }
    }
}

/// Trims `text` and splits it into non-empty paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.trim()
        .split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn custom_actions(custom: &Map<String, Value>) -> Result<Vec<PlatformAction>, DropReason> {
    let kind = match_custom(custom).ok_or(DropReason::UnknownCustomPayload)?;
    if !kind.is_supported() {
        return Err(DropReason::UnsupportedKind(kind));
    }

    let content = match kind {
        CustomKind::Interactive => {
            let content = field_text(custom, "content").unwrap_or_default();
            return Ok(vec![PlatformAction::Send(ChatwootMessage {
                content,
                content_type: field_text(custom, "content_type"),
                content_attributes: custom.get("content_attributes").cloned(),
                private: false,
            })]);
        }
        CustomKind::ChatAction => return Ok(vec![PlatformAction::Typing]),
        CustomKind::Text => field_text(custom, "text"),
        CustomKind::MediaGroup => media_group_text(custom),
        CustomKind::Venue => match (field_text(custom, "title"), field_text(custom, "address")) {
            (Some(title), Some(address)) => Some(format!("{}\n{}", title, address)),
            _ => None,
        },
        CustomKind::Location => {
            match (field_text(custom, "latitude"), field_text(custom, "longitude")) {
                (Some(lat), Some(lon)) => Some(format!("{}, {}", lat, lon)),
                _ => None,
            }
        }
        CustomKind::Contact => {
            let name = match field_text(custom, "last_name") {
                Some(last) => format!(
                    "{} {}",
                    field_text(custom, "first_name").unwrap_or_default(),
                    last
                ),
                None => field_text(custom, "first_name").unwrap_or_default(),
            };
            field_text(custom, "phone_number").map(|phone| format!("{}: {}", name, phone))
        }
        media => media_text(custom, media.as_str()),
    };

    match content {
        Some(content) => {
            let actions: Vec<PlatformAction> = split_paragraphs(&content)
                .into_iter()
                .map(|part| PlatformAction::Send(ChatwootMessage::text(part)))
                .collect();
            if actions.is_empty() {
                Err(DropReason::EmptyContent(kind))
            } else {
                Ok(actions)
            }
        }
        None => Err(DropReason::EmptyContent(kind)),
    }
}
