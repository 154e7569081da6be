//! HTTP adapter for the Chatwoot webhook bridge.

mod handlers;
mod routes;

pub use handlers::{receive_webhook, BridgeHandlers, SKIPPED_BODY, SUCCESS_BODY};
pub use routes::bridge_routes;
