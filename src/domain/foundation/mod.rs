//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers and error types that form the shared vocabulary of
//! the bridge, NLG, action and model server components.

mod errors;
mod ids;

pub use errors::{UpstreamError, UpstreamService};
pub use ids::{nested_id, normalize_id, ConversationRef};
