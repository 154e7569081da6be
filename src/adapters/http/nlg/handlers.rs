//! HTTP handlers for the NLG endpoint.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use super::dto::NlgRequest;
use crate::application::{GenerateResponseHandler, GenerateResponseQuery};

#[derive(Clone)]
pub struct NlgHandlers {
    generate_handler: Arc<GenerateResponseHandler>,
}

impl NlgHandlers {
    pub fn new(generate_handler: Arc<GenerateResponseHandler>) -> Self {
        Self { generate_handler }
    }
}

/// POST /nlg - Render a response for the engine
///
/// Always answers with a message; an unreadable body resolves like a request
/// for an unknown response.
pub async fn generate(State(handlers): State<NlgHandlers>, body: Bytes) -> Json<Value> {
    let request: NlgRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unreadable NLG request, answering with the default response");
        NlgRequest::default()
    });

    let query = GenerateResponseQuery {
        request: request.into(),
    };
    let response_name = query.request.response.clone();
    let result = handlers.generate_handler.handle(query).await;
    tracing::debug!(response = %response_name, tier = %result.tier, "Response generated");

    Json(result.message)
}
