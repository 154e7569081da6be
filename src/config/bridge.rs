//! Webhook bridge configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Webhook bridge service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Port the webhook endpoint listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    5002
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(BridgeConfig::default().port, 5002);
        assert!(BridgeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_port_is_invalid() {
        let config = BridgeConfig { port: 0 };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }
}
