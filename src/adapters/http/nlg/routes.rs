//! HTTP routes for the NLG endpoint.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{generate, NlgHandlers};
use crate::adapters::http::health::health;

/// Creates the NLG router: `POST /nlg` and `GET /`.
pub fn nlg_routes(handlers: NlgHandlers) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/nlg", post(generate))
        .with_state(handlers)
}
