//! GenerateResponse - Query handler producing one bot message for the engine.

use serde_json::Value;
use std::sync::Arc;

use super::response_cache::ResponseCache;
use crate::domain::nlg::{resolve, ResolutionRequest, ResolutionTier};

/// Query to render a named response for a conversation.
#[derive(Debug, Clone, Default)]
pub struct GenerateResponseQuery {
    pub request: ResolutionRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponseResult {
    pub message: Value,
    pub tier: ResolutionTier,
}

/// Resolves responses against the cache. Never fails: when no source is
/// usable the built-in default message is returned.
pub struct GenerateResponseHandler {
    cache: Arc<ResponseCache>,
}

impl GenerateResponseHandler {
    pub fn new(cache: Arc<ResponseCache>) -> Self {
        Self { cache }
    }

    pub async fn handle(&self, query: GenerateResponseQuery) -> GenerateResponseResult {
        let snapshot = match self.cache.snapshot().await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::error!(
                    response = %query.request.response,
                    error = %err,
                    "No response sources available"
                );
                None
            }
        };

        let resolution = resolve(snapshot.as_deref(), &query.request);
        if resolution.tier != ResolutionTier::Canned && resolution.tier != ResolutionTier::Domain {
            tracing::warn!(
                response = %query.request.response,
                tier = %resolution.tier,
                "Requested response unavailable, using fallback"
            );
        }

        GenerateResponseResult {
            message: resolution.message,
            tier: resolution.tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{UpstreamError, UpstreamService};
    use crate::domain::nlg::{
        CannedResponse, DomainDefinition, NlgError, ResponseTable, ResponseVariant,
        DEFAULT_RESPONSE_TEXT,
    };
    use crate::ports::{CannedResponseSource, DomainSource};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    struct StaticCanned(Vec<CannedResponse>);

    #[async_trait]
    impl CannedResponseSource for StaticCanned {
        async fn canned_responses(&self) -> Result<Vec<CannedResponse>, UpstreamError> {
            Ok(self.0.clone())
        }
    }

    struct FailingCanned;

    #[async_trait]
    impl CannedResponseSource for FailingCanned {
        async fn canned_responses(&self) -> Result<Vec<CannedResponse>, UpstreamError> {
            Err(UpstreamError::network(UpstreamService::Chatwoot, "refused"))
        }
    }

    struct StaticDomain(DomainDefinition);

    #[async_trait]
    impl DomainSource for StaticDomain {
        async fn load_domain(&self) -> Result<DomainDefinition, NlgError> {
            Ok(self.0.clone())
        }
    }

    fn domain() -> DomainDefinition {
        DomainDefinition {
            responses: ResponseTable::new(HashMap::from([(
                "utter_ask_name".to_string(),
                vec![ResponseVariant::text("What is your name, {title}?")],
            )])),
            slots: HashMap::new(),
        }
    }

    fn handler(canned: Arc<dyn CannedResponseSource>) -> GenerateResponseHandler {
        let cache = ResponseCache::new(
            canned,
            Arc::new(StaticDomain(domain())),
            Duration::from_secs(60),
        );
        GenerateResponseHandler::new(Arc::new(cache))
    }

    fn query(response: &str, arguments: Value) -> GenerateResponseQuery {
        GenerateResponseQuery {
            request: ResolutionRequest {
                response: response.to_string(),
                arguments: arguments.as_object().cloned().unwrap_or_default(),
                sender_id: "u1".to_string(),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn renders_canned_response_first() {
        let handler = handler(Arc::new(StaticCanned(vec![CannedResponse {
            short_code: "ask_name".into(),
            content: "Your name please?".into(),
        }])));

        let result = handler.handle(query("utter_ask_name", json!({}))).await;
        assert_eq!(result.tier, ResolutionTier::Canned);
        assert_eq!(result.message, json!({"text": "Your name please?"}));
    }

    #[tokio::test]
    async fn falls_back_to_domain_with_arguments() {
        let handler = handler(Arc::new(StaticCanned(vec![CannedResponse {
            short_code: "other".into(),
            content: "x".into(),
        }])));

        let result = handler
            .handle(query("utter_ask_name", json!({"title": "Dr."})))
            .await;
        assert_eq!(result.tier, ResolutionTier::Domain);
        assert_eq!(result.message, json!({"text": "What is your name, Dr.?"}));
    }

    #[tokio::test]
    async fn unavailable_sources_yield_built_in_default() {
        let handler = handler(Arc::new(FailingCanned));

        let result = handler.handle(query("utter_ask_name", json!({}))).await;
        assert_eq!(result.tier, ResolutionTier::BuiltIn);
        assert_eq!(result.message, json!({"text": DEFAULT_RESPONSE_TEXT}));
    }
}
