//! Chatwoot configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Chatwoot API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatwootSettings {
    /// Base URL of the Chatwoot installation
    #[serde(default = "default_url")]
    pub url: String,

    /// Agent bot or user access token
    pub api_key: Option<String>,

    /// Account whose canned responses are served
    #[serde(default = "default_account_id")]
    pub account_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ChatwootSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate Chatwoot configuration; the API key is only checked when
    /// the running service talks to Chatwoot.
    pub fn validate(&self, require_api_key: bool) -> Result<(), ValidationError> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("chatwoot.url"));
        }
        if require_api_key && !self.has_api_key() {
            return Err(ValidationError::MissingRequired("CHATWOOT_RASA__CHATWOOT__API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ChatwootSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: None,
            account_id: default_account_id(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_account_id() -> String {
    "1".to_string()
}

fn default_timeout() -> u64 {
    30
}
