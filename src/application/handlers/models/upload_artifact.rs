//! UploadArtifact - Command handler storing an uploaded model archive.

use std::sync::Arc;

use crate::domain::artifacts::{allowed_file, secure_filename, ArtifactError};
use crate::ports::ArtifactStore;

#[derive(Debug, Clone)]
pub struct UploadArtifactCommand {
    /// Filename as given in the upload URL.
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadArtifactResult {
    /// Sanitized name the archive was stored under.
    pub stored_name: String,
    pub size_bytes: usize,
}

pub struct UploadArtifactHandler {
    store: Arc<dyn ArtifactStore>,
    allowed_extensions: Vec<String>,
}

impl UploadArtifactHandler {
    pub fn new(store: Arc<dyn ArtifactStore>, allowed_extensions: Vec<String>) -> Self {
        Self {
            store,
            allowed_extensions,
        }
    }

    pub async fn handle(&self, cmd: UploadArtifactCommand) -> Result<UploadArtifactResult, ArtifactError> {
        if !allowed_file(&cmd.filename, &self.allowed_extensions) {
            return Err(ArtifactError::NotAllowed(cmd.filename));
        }
        let stored_name = secure_filename(&cmd.filename)
            .filter(|name| allowed_file(name, &self.allowed_extensions))
            .ok_or_else(|| ArtifactError::NotAllowed(cmd.filename.clone()))?;

        self.store.save(&stored_name, &cmd.bytes).await?;
        tracing::info!(filename = %stored_name, size = cmd.bytes.len(), "Model uploaded");

        Ok(UploadArtifactResult {
            stored_name,
            size_bytes: cmd.bytes.len(),
        })
    }
}
