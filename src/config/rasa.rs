//! Rasa configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Rasa HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RasaSettings {
    /// Base URL of the Rasa server
    #[serde(default = "default_url")]
    pub url: String,

    /// Token for Rasa's token authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries of response-source fetches
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl RasaSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("rasa.url"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RasaSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:5005".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}
