//! Rasa REST channel client - Implementation of DialogueEngine.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::config::RasaConfig;
use crate::adapters::upstream::{build_client, check_status, map_send_error};
use crate::domain::bridge::{BotMessage, UserMessage};
use crate::domain::foundation::{UpstreamError, UpstreamService};
use crate::ports::DialogueEngine;

const SERVICE: UpstreamService = UpstreamService::Rasa;

#[derive(Debug, Serialize)]
struct RestMessage<'a> {
    sender: &'a str,
    message: &'a str,
    input_channel: &'a str,
    metadata: &'a Value,
}

/// Posts user messages to `{base_url}/webhooks/rest/webhook`.
///
/// Dispatches are not retried: a repeated message would be processed twice
/// by the engine.
pub struct RasaRestChannel {
    config: RasaConfig,
    client: Client,
}

impl RasaRestChannel {
    pub fn new(config: RasaConfig) -> Result<Self, UpstreamError> {
        let client = build_client(SERVICE, config.timeout)?;
        Ok(Self { config, client })
    }

    fn webhook_url(&self) -> String {
        format!("{}/webhooks/rest/webhook", self.config.base_url)
    }
}

#[async_trait]
impl DialogueEngine for RasaRestChannel {
    async fn handle_message(&self, message: &UserMessage) -> Result<Vec<BotMessage>, UpstreamError> {
        let body = RestMessage {
            sender: &message.sender_id,
            message: &message.text,
            input_channel: &message.input_channel,
            metadata: &message.metadata,
        };

        let response = self
            .client
            .post(self.webhook_url())
            .query(&self.config.token_query())
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(SERVICE, e))?;
        let response = check_status(SERVICE, response).await?;

        response
            .json::<Vec<BotMessage>>()
            .await
            .map_err(|e| UpstreamError::decode(SERVICE, format!("Failed to parse replies: {}", e)))
    }
}
