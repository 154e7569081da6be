//! Action server handlers.

mod builtin;
mod registry;

pub use builtin::{
    builtin_registry, DefaultFallbackAndHandoff, Handoff, HandoffNotification, HelloWorld,
    TagConversation,
};
pub use registry::{Action, ActionRegistry, RunActionCommand, RunActionHandler};
