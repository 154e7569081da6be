//! Chatwoot adapter.

mod client;
mod dto;

pub use client::{ChatwootClient, ChatwootConfig};
