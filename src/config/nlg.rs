//! NLG server configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// NLG server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NlgConfig {
    /// Port the NLG endpoint listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// How long a cached response table stays fresh, in seconds
    #[serde(default = "default_refresh_seconds")]
    pub refresh_seconds: u64,

    /// Read the domain from this file instead of the Rasa HTTP API
    pub domain_path: Option<PathBuf>,
}

impl NlgConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_seconds)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.refresh_seconds == 0 {
            return Err(ValidationError::InvalidRefreshInterval);
        }
        Ok(())
    }
}

impl Default for NlgConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            refresh_seconds: default_refresh_seconds(),
            domain_path: None,
        }
    }
}

fn default_port() -> u16 {
    5056
}

fn default_refresh_seconds() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NlgConfig::default();
        assert_eq!(config.port, 5056);
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert!(config.domain_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_refresh_is_invalid() {
        let config = NlgConfig {
            refresh_seconds: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRefreshInterval));
    }
}
