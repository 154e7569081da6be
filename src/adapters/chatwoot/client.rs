//! Chatwoot REST client - Implementation of MessagingPlatform and
//! CannedResponseSource.
//!
//! Every call authenticates with the `api_access_token` header against
//! `{base_url}/api/v1`. Only the canned-response fetch is retried; message
//! relay calls are made once so a retry can never duplicate a chat message.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::dto::{
    CannedResponseDto, LabelsRequest, LabelsResponse, ToggleStatusRequest, ToggleTypingRequest,
};
use crate::adapters::upstream::{build_client, check_status, map_send_error, RetryPolicy};
use crate::domain::bridge::ChatwootMessage;
use crate::domain::foundation::{ConversationRef, UpstreamError, UpstreamService};
use crate::domain::nlg::CannedResponse;
use crate::ports::{CannedResponseSource, MessagingPlatform};

const SERVICE: UpstreamService = UpstreamService::Chatwoot;
const TOKEN_HEADER: &str = "api_access_token";

/// Configuration for the Chatwoot client.
#[derive(Debug, Clone)]
pub struct ChatwootConfig {
    api_key: Secret<String>,
    /// Base URL of the Chatwoot installation, without `/api/v1`.
    pub base_url: String,
    /// Account whose canned responses are loaded.
    pub account_id: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl ChatwootConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_id: "1".to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

pub struct ChatwootClient {
    config: ChatwootConfig,
    client: Client,
}

impl ChatwootClient {
    pub fn new(config: ChatwootConfig) -> Result<Self, UpstreamError> {
        let client = build_client(SERVICE, config.timeout)?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.config.base_url, path)
    }

    fn conversation_url(&self, conversation: &ConversationRef, suffix: &str) -> String {
        self.url(&format!("{}/{}", conversation.api_path(), suffix))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(TOKEN_HEADER, self.config.api_key())
            .header("Content-Type", "application/json")
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| map_send_error(SERVICE, e))?;
        let response = check_status(SERVICE, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::decode(SERVICE, format!("Failed to parse response: {}", e)))
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<(), UpstreamError> {
        let response = self
            .authorized(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(|e| map_send_error(SERVICE, e))?;
        check_status(SERVICE, response).await?;
        tracing::debug!(url = %url, "Chatwoot request succeeded");
        Ok(())
    }

    async fn fetch_canned_once(&self) -> Result<Vec<CannedResponse>, UpstreamError> {
        let url = self.url(&format!(
            "/accounts/{}/canned_responses",
            self.config.account_id
        ));
        let dtos: Vec<CannedResponseDto> = self.get_json(&url).await?;
        Ok(dtos.into_iter().filter_map(CannedResponseDto::into_domain).collect())
    }
}

#[async_trait]
impl CannedResponseSource for ChatwootClient {
    async fn canned_responses(&self) -> Result<Vec<CannedResponse>, UpstreamError> {
        self.config.retry.run(|| self.fetch_canned_once()).await
    }
}

#[async_trait]
impl MessagingPlatform for ChatwootClient {
    async fn send_message(
        &self,
        conversation: &ConversationRef,
        message: &ChatwootMessage,
    ) -> Result<(), UpstreamError> {
        let url = self.conversation_url(conversation, "messages");
        self.post_json(&url, message).await
    }

    async fn toggle_typing(&self, conversation: &ConversationRef) -> Result<(), UpstreamError> {
        let url = self.conversation_url(conversation, "toggle_typing_status");
        self.post_json(&url, &ToggleTypingRequest { typing_status: "on" })
            .await
    }

    async fn labels(&self, conversation: &ConversationRef) -> Result<Vec<String>, UpstreamError> {
        let url = self.conversation_url(conversation, "labels");
        let labels: LabelsResponse = self.get_json(&url).await?;
        Ok(labels.payload)
    }

    async fn set_labels(
        &self,
        conversation: &ConversationRef,
        labels: &[String],
    ) -> Result<(), UpstreamError> {
        let url = self.conversation_url(conversation, "labels");
        self.post_json(&url, &LabelsRequest { labels }).await
    }

    async fn open_conversation(&self, conversation: &ConversationRef) -> Result<(), UpstreamError> {
        let url = self.conversation_url(conversation, "toggle_status");
        self.post_json(&url, &ToggleStatusRequest { status: "open" })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = ChatwootConfig::new("https://chat.example.com/", "secret")
            .with_account_id("7")
            .with_timeout(Duration::from_secs(5))
            .with_retry(RetryPolicy::none());

        assert_eq!(config.base_url, "https://chat.example.com");
        assert_eq!(config.account_id, "7");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retry, RetryPolicy::none());
        assert_eq!(config.api_key(), "secret");
    }

    #[test]
    fn builds_conversation_urls() {
        let client = ChatwootClient::new(ChatwootConfig::new("http://cw:3000", "k")).unwrap();
        let conversation = ConversationRef::new("1", "42");
        assert_eq!(
            client.conversation_url(&conversation, "messages"),
            "http://cw:3000/api/v1/accounts/1/conversations/42/messages"
        );
        assert_eq!(
            client.url("/accounts/1/canned_responses"),
            "http://cw:3000/api/v1/accounts/1/canned_responses"
        );
    }

    #[test]
    fn api_key_is_not_debug_printed() {
        let config = ChatwootConfig::new("http://cw", "super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
