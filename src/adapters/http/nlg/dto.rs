//! Request body of the engine's NLG call.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::nlg::ResolutionRequest;

/// `POST /nlg` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NlgRequest {
    /// Older engine versions send the name as `template`.
    #[serde(default, alias = "template")]
    pub response: String,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
    #[serde(default)]
    pub tracker: NlgTrackerDto,
    #[serde(default)]
    pub channel: Option<ChannelField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NlgTrackerDto {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub events: Vec<Value>,
}

/// The channel arrives either as `{"name": ...}` or as a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChannelField {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

impl ChannelField {
    pub fn name(&self) -> Option<&str> {
        match self {
            ChannelField::Name(name) => Some(name.as_str()),
            ChannelField::Object { name } => name.as_deref(),
        }
        .filter(|name| !name.is_empty())
    }
}

impl From<NlgRequest> for ResolutionRequest {
    fn from(req: NlgRequest) -> Self {
        ResolutionRequest {
            response: req.response,
            arguments: req.arguments.unwrap_or_default(),
            sender_id: req.tracker.sender_id.unwrap_or_default(),
            events: req.tracker.events,
            channel: req
                .channel
                .as_ref()
                .and_then(ChannelField::name)
                .map(str::to_string),
        }
    }
}
