//! Layers every service router is wrapped in.

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Adds an `x-request-id` (generated when absent and echoed back) and
/// request tracing.
pub fn with_common_layers(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

/// Answers 408 when `router` takes longer than `request_timeout` to respond.
///
/// Only for routes whose handlers may be cancelled midway: the future is
/// dropped on expiry.
pub fn with_request_timeout<S>(router: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(TimeoutLayer::new(request_timeout))
}
