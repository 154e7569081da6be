//! HTTP routes for the model server.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;

use super::handlers::{browse_path, browse_root, upload, ModelHandlers};
use crate::adapters::http::middleware::{api_key_middleware, with_request_timeout, ApiKeyState};

/// Creates the model server router.
///
/// - `GET /` listing of the models directory
/// - `GET /*path` download or listing, `@latest` allowed
/// - `POST /upload/:filename` raw-body upload
///
/// Bodies larger than `max_body_bytes` are rejected with 413. Browsing is
/// bounded by `browse_timeout`; uploads run as long as the body keeps coming.
pub fn model_routes(
    handlers: ModelHandlers,
    api_key: ApiKeyState,
    max_body_bytes: usize,
    browse_timeout: Duration,
) -> Router {
    let browse: Router<ModelHandlers> = Router::new()
        .route("/", get(browse_root))
        .route("/*path", get(browse_path));

    Router::new()
        .merge(with_request_timeout(browse, browse_timeout))
        .route("/upload/:filename", post(upload))
        .with_state(handlers)
        .layer(middleware::from_fn_with_state(api_key, api_key_middleware))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
}
