use thiserror::Error;

/// Failures of the model store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("no models found in {0}")]
    NoArtifacts(String),

    #[error("no file or file extension not allowed: {0}")]
    NotAllowed(String),

    #[error("invalid API key, access denied")]
    Unauthorized,

    #[error("storage error: {0}")]
    Io(String),
}

impl ArtifactError {
    pub fn io(message: impl Into<String>) -> Self {
        ArtifactError::Io(message.into())
    }
}
