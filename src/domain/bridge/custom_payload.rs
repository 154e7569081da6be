//! Dispatch of custom JSON replies onto Chatwoot message kinds.
//!
//! Custom payloads follow the Telegram bot API field names. The first entry of
//! [`FIELD_SETS`] whose fields are all present (and non-null) decides the kind.

use serde_json::{Map, Value};

/// Message kind selected for a custom payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomKind {
    /// Native Chatwoot message (`content` + `content_type`), passed through.
    Interactive,
    Text,
    Photo,
    Audio,
    Document,
    Sticker,
    Video,
    VideoNote,
    Animation,
    Voice,
    MediaGroup,
    Venue,
    Location,
    Contact,
    Game,
    ChatAction,
    Invoice,
}

impl CustomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomKind::Interactive => "interactive",
            CustomKind::Text => "text",
            CustomKind::Photo => "photo",
            CustomKind::Audio => "audio",
            CustomKind::Document => "document",
            CustomKind::Sticker => "sticker",
            CustomKind::Video => "video",
            CustomKind::VideoNote => "video_note",
            CustomKind::Animation => "animation",
            CustomKind::Voice => "voice",
            CustomKind::MediaGroup => "media",
            CustomKind::Venue => "venue",
            CustomKind::Location => "location",
            CustomKind::Contact => "contact",
            CustomKind::Game => "game",
            CustomKind::ChatAction => "action",
            CustomKind::Invoice => "invoice",
        }
    }

    /// Kinds Chatwoot has no representation for.
    pub fn is_supported(&self) -> bool {
        !matches!(self, CustomKind::Game | CustomKind::Invoice)
    }
}

impl std::fmt::Display for CustomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required fields per kind, in priority order.
pub const FIELD_SETS: &[(&[&str], CustomKind)] = &[
    (&["content", "content_type"], CustomKind::Interactive),
    (&["text"], CustomKind::Text),
    (&["photo"], CustomKind::Photo),
    (&["audio"], CustomKind::Audio),
    (&["document"], CustomKind::Document),
    (&["sticker"], CustomKind::Sticker),
    (&["video"], CustomKind::Video),
    (&["video_note"], CustomKind::VideoNote),
    (&["animation"], CustomKind::Animation),
    (&["voice"], CustomKind::Voice),
    (&["media"], CustomKind::MediaGroup),
    (
        &["latitude", "longitude", "title", "address"],
        CustomKind::Venue,
    ),
    (&["latitude", "longitude"], CustomKind::Location),
    (&["phone_number", "first_name"], CustomKind::Contact),
    (&["game_short_name"], CustomKind::Game),
    (&["action"], CustomKind::ChatAction),
    (
        &[
            "title",
            "description",
            "payload",
            "provider_token",
            "start_parameter",
            "currency",
            "prices",
        ],
        CustomKind::Invoice,
    ),
];

/// Returns the first kind whose required fields are all present.
pub fn match_custom(custom: &Map<String, Value>) -> Option<CustomKind> {
    FIELD_SETS
        .iter()
        .find(|(fields, _)| {
            fields
                .iter()
                .all(|field| custom.get(*field).map_or(false, |v| !v.is_null()))
        })
        .map(|(_, kind)| *kind)
}

/// String form of a payload field: strings raw, other values as JSON.
pub(crate) fn field_text(custom: &Map<String, Value>, field: &str) -> Option<String> {
    match custom.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Text rendering of a media-like kind: optional caption, then the media
/// reference on its own line.
pub(crate) fn media_text(custom: &Map<String, Value>, field: &str) -> Option<String> {
    let media = field_text(custom, field)?;
    Some(with_caption(field_text(custom, "caption"), media))
}

/// Text rendering of a media group: one line per item.
pub(crate) fn media_group_text(custom: &Map<String, Value>) -> Option<String> {
    let items = custom.get("media")?.as_array()?;
    let lines: Vec<String> = items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => media_text(obj, "media"),
            _ => None,
        })
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn with_caption(caption: Option<String>, body: String) -> String {
    match caption {
        Some(caption) if !caption.trim().is_empty() => format!("{}\n{}", caption, body),
        _ => body,
    }
}
