//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (conversation identity, upstream errors)
//! - `nlg` - Response tables, templates and tiered response resolution
//! - `bridge` - Chatwoot event validation and reply translation
//! - `artifacts` - Model directory entries and naming rules
//! - `actions` - Custom action protocol and working hours

pub mod actions;
pub mod artifacts;
pub mod bridge;
pub mod foundation;
pub mod nlg;
