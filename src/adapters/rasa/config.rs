use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::adapters::upstream::RetryPolicy;

/// Connection settings for the Rasa HTTP API.
#[derive(Debug, Clone)]
pub struct RasaConfig {
    /// Base URL of the Rasa server, e.g. `http://localhost:5005`.
    pub base_url: String,
    token: Option<Secret<String>>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl RasaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the token passed as `?token=` on every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty()).map(Secret::new);
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

    /// Query parameters for authenticated requests.
    pub(crate) fn token_query(&self) -> Vec<(&'static str, String)> {
        self.token
            .as_ref()
            .map(|t| vec![("token", t.expose_secret().clone())])
            .unwrap_or_default()
    }
}
