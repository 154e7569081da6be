//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file when
//! present) using the `config` and `dotenvy` crates. Variables carry the
//! `CHATWOOT_RASA` prefix and nested values use double underscores.
//!
//! # Example
//!
//! ```no_run
//! use chatwoot_rasa::config::{AppConfig, Service};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate_for(Service::Nlg).expect("Invalid configuration");
//! ```

mod actions;
mod bridge;
mod chatwoot;
mod error;
mod models;
mod nlg;
mod rasa;
mod server;

pub use actions::ActionsConfig;
pub use bridge::BridgeConfig;
pub use chatwoot::ChatwootSettings;
pub use error::{ConfigError, ValidationError};
pub use models::ModelsConfig;
pub use nlg::NlgConfig;
pub use rasa::RasaSettings;
pub use server::ServerConfig;

use serde::Deserialize;

/// The services this binary can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Webhook,
    Nlg,
    Models,
    Actions,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Webhook => "webhook",
            Service::Nlg => "nlg",
            Service::Models => "models",
            Service::Actions => "actions",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads. Use
/// [`AppConfig::validate_for`] to check what a given service needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Bind address, runtime and logging
    #[serde(default)]
    pub server: ServerConfig,

    /// Chatwoot API
    #[serde(default)]
    pub chatwoot: ChatwootSettings,

    /// Rasa HTTP API
    #[serde(default)]
    pub rasa: RasaSettings,

    /// Webhook bridge
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// NLG server
    #[serde(default)]
    pub nlg: NlgConfig,

    /// Model server
    #[serde(default)]
    pub models: ModelsConfig,

    /// Action server
    #[serde(default)]
    pub actions: ActionsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `CHATWOOT_RASA__NLG__PORT=5056` -> `nlg.port = 5056`
    /// - `CHATWOOT_RASA__CHATWOOT__API_KEY=...` -> `chatwoot.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHATWOOT_RASA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate the sections the given service depends on.
    pub fn validate_for(&self, service: Service) -> Result<(), ValidationError> {
        self.server.validate()?;
        match service {
            Service::Webhook => {
                self.bridge.validate()?;
                self.chatwoot.validate(true)?;
                self.rasa.validate()?;
            }
            Service::Nlg => {
                self.nlg.validate()?;
                self.chatwoot.validate(true)?;
                if self.nlg.domain_path.is_none() {
                    self.rasa.validate()?;
                }
            }
            Service::Models => {
                self.models.validate()?;
            }
            Service::Actions => {
                self.actions.validate()?;
                self.chatwoot.validate(true)?;
            }
        }
        Ok(())
    }

    /// Port configured for a service.
    pub fn port_for(&self, service: Service) -> u16 {
        match service {
            Service::Webhook => self.bridge.port,
            Service::Nlg => self.nlg.port,
            Service::Models => self.models.port,
            Service::Actions => self.actions.port,
        }
    }
}
