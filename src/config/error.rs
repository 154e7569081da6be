//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL for {0}: must start with http:// or https://")]
    InvalidUrl(&'static str),

    #[error("Refresh interval must be at least one second")]
    InvalidRefreshInterval,

    #[error("Maximum request size must be greater than zero")]
    InvalidRequestSize,

    #[error("At least one allowed upload extension is required")]
    NoAllowedExtensions,

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("Worker count must be greater than zero")]
    InvalidWorkerCount,
}
