//! HTTP adapters - the four service routers.
//!
//! Each service has its own module with handler state, handlers and routes.

pub mod actions;
pub mod bridge;
pub mod health;
pub mod middleware;
pub mod models;
pub mod nlg;

// Re-export key types for convenience
pub use actions::{action_routes, ActionHandlers};
pub use bridge::{bridge_routes, BridgeHandlers};
pub use middleware::{with_common_layers, with_request_timeout, ApiKeyState};
pub use models::{model_routes, ModelHandlers};
pub use nlg::{nlg_routes, NlgHandlers};
