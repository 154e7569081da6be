//! HTTP handlers for the webhook bridge.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};

use crate::application::{
    HandleInboundEventCommand, HandleInboundEventHandler, HandleInboundEventResult,
};
use crate::domain::bridge::InboundEvent;

/// Acknowledgment for events the bridge does not act on.
pub const SKIPPED_BODY: &str = "Skipped invalid event";

/// Acknowledgment once a valid event was handled.
pub const SUCCESS_BODY: &str = "success";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct BridgeHandlers {
    inbound_handler: Arc<HandleInboundEventHandler>,
}

impl BridgeHandlers {
    pub fn new(inbound_handler: Arc<HandleInboundEventHandler>) -> Self {
        Self { inbound_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /webhook - Chatwoot agent bot webhook
///
/// Always answers 200 so Chatwoot does not redeliver. Bodies that are not a
/// JSON event are treated like any other invalid event.
pub async fn receive_webhook(
    State(handlers): State<BridgeHandlers>,
    body: Bytes,
) -> impl IntoResponse {
    let event: InboundEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Webhook body is not a Chatwoot event");
            return (StatusCode::OK, SKIPPED_BODY);
        }
    };

    match handlers
        .inbound_handler
        .handle(HandleInboundEventCommand { event })
        .await
    {
        HandleInboundEventResult::Skipped(_) => (StatusCode::OK, SKIPPED_BODY),
        HandleInboundEventResult::Processed {
            conversation,
            dispatched,
            report,
        } => {
            tracing::info!(
                conversation = %conversation,
                dispatched,
                sent = report.sent(),
                dropped = report.dropped(),
                failed = report.failed(),
                "Webhook event handled"
            );
            (StatusCode::OK, SUCCESS_BODY)
        }
    }
}
