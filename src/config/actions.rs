//! Action server configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::actions::WorkingHours;

/// Custom action server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ActionsConfig {
    /// Port the action endpoint listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Start of support hours, `HH:MM` or `HH:MM:SS`
    #[serde(default = "default_start")]
    pub working_hours_start: String,

    /// End of support hours, `HH:MM` or `HH:MM:SS`
    #[serde(default = "default_end")]
    pub working_hours_end: String,
}

impl ActionsConfig {
    pub fn working_hours(&self) -> Result<WorkingHours, ValidationError> {
        WorkingHours::parse(&self.working_hours_start, &self.working_hours_end)
            .map_err(|e| ValidationError::InvalidWorkingHours(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.working_hours()?;
        Ok(())
    }
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            working_hours_start: default_start(),
            working_hours_end: default_end(),
        }
    }
}

fn default_port() -> u16 {
    5055
}

fn default_start() -> String {
    "07:00".to_string()
}

fn default_end() -> String {
    "19:00".to_string()
}
