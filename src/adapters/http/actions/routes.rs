//! HTTP routes for the action server.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_actions, run_action, ActionHandlers};
use crate::adapters::http::health::health;

/// Creates the action router: `POST /webhook`, `GET /health`, `GET /actions`.
pub fn action_routes(handlers: ActionHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/actions", get(list_actions))
        .route("/webhook", post(run_action))
        .with_state(handlers)
}
