//! Chatwoot Rasa - connects a Chatwoot inbox to a Rasa assistant.
//!
//! The crate provides four HTTP services sharing one configuration:
//!
//! - **Webhook bridge**: receives Chatwoot agent-bot events, forwards user
//!   messages to Rasa and relays the replies back into the conversation.
//! - **NLG server**: renders bot responses from Chatwoot canned responses and
//!   the Rasa domain, with tiered fallbacks that always yield a message.
//! - **Model server**: serves, lists and accepts trained model archives.
//! - **Action server**: runs custom actions (labels, handoff, working hours).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
