//! Model server configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Model/artifact directory server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Port the model server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served and written to
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Key required by uploads and directory listings
    pub api_key: Option<String>,

    /// Largest accepted request body, in megabytes
    #[serde(default = "default_max_request_size_mb")]
    pub max_request_size_mb: u64,

    /// Comma separated list of accepted upload extensions
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: String,
}

impl ModelsConfig {
    pub fn max_request_size_bytes(&self) -> usize {
        usize::try_from(self.max_request_size_mb.saturating_mul(1000 * 1000))
            .unwrap_or(usize::MAX)
    }

    /// Accepted extensions, trimmed, lowercased and without a leading dot
    pub fn allowed_extensions(&self) -> Vec<String> {
        self.allowed_extensions
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.max_request_size_mb == 0 {
            return Err(ValidationError::InvalidRequestSize);
        }
        if self.allowed_extensions().is_empty() {
            return Err(ValidationError::NoAllowedExtensions);
        }
        Ok(())
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            models_dir: default_models_dir(),
            api_key: None,
            max_request_size_mb: default_max_request_size_mb(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_max_request_size_mb() -> u64 {
    64
}

fn default_allowed_extensions() -> String {
    "tar.gz".to_string()
}
