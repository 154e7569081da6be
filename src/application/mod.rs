//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change outside state (relay, upload, actions); query
//! handlers only read (response generation, model browsing).

pub mod handlers;

pub use handlers::actions::{builtin_registry, ActionRegistry, RunActionCommand, RunActionHandler};
pub use handlers::bridge::{
    HandleInboundEventCommand, HandleInboundEventHandler, HandleInboundEventResult,
};
pub use handlers::models::{
    ArtifactView, BrowseArtifactsHandler, BrowseArtifactsQuery, UploadArtifactCommand,
    UploadArtifactHandler, UploadArtifactResult,
};
pub use handlers::nlg::{
    GenerateResponseHandler, GenerateResponseQuery, GenerateResponseResult, ResponseCache,
};
