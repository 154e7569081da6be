//! Artifact Store Port - Filesystem holding trained model archives.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::artifacts::{ArtifactEntry, ArtifactError};

/// What a relative path points at inside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredItem {
    File(PathBuf),
    Directory(PathBuf),
}

/// Read and write access to the models directory.
///
/// All paths are relative to the store root and already free of parent
/// components.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Resolves a relative path; `NotFound` when nothing exists there.
    async fn lookup(&self, relative: &Path) -> Result<StoredItem, ArtifactError>;

    /// Entries of a directory in scan order.
    async fn list(&self, relative: &Path) -> Result<Vec<ArtifactEntry>, ArtifactError>;

    /// Writes `bytes` under `filename` at the store root, replacing any
    /// existing file. Returns the stored path.
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ArtifactError>;
}
