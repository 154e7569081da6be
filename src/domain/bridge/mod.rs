//! Webhook bridge domain: validation of Chatwoot events and translation of
//! engine replies into Chatwoot messages.

mod custom_payload;
mod inbound;
mod outbound;
mod relay;

pub use custom_payload::{match_custom, CustomKind, FIELD_SETS};
pub use inbound::{
    InboundEvent, InvalidEventError, UserMessage, ValidatedEvent, INPUT_CHANNEL, RESTART_COMMAND,
    START_COMMAND,
};
pub use outbound::{
    split_paragraphs, BotMessage, Button, ChatwootMessage, DropReason, OutboundDirective,
    PlatformAction, SelectItem, PARAGRAPH_SEPARATOR,
};
pub use relay::{describe, RelayAttempt, RelayOutcome, RelayReport};
