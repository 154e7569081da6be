//! HTTP adapter for the custom action server.

mod dto;
mod handlers;
mod routes;

pub use dto::{ActionErrorResponse, ActionInfo};
pub use handlers::{list_actions, run_action, ActionHandlers};
pub use routes::action_routes;
