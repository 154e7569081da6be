//! HTTP routes for the webhook bridge.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{receive_webhook, BridgeHandlers};
use crate::adapters::http::health::health;

/// Creates the bridge router: `POST /webhook` and `GET /`.
pub fn bridge_routes(handlers: BridgeHandlers) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/webhook", post(receive_webhook))
        .with_state(handlers)
}
