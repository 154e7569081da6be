//! Local Filesystem Artifact Store - Implementation of ArtifactStore.
//!
//! Serves the models directory as-is. Directory scans run on the blocking
//! pool; uploads use a write-to-temp-then-rename pattern so a reader never
//! sees a partially written archive:
//! 1. Write content to `{name}.upload.tmp`
//! 2. Sync to disk
//! 3. Rename to `{name}`

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::io::AsyncWriteExt;

use crate::domain::artifacts::{human_readable_size, ArtifactEntry, ArtifactError};
use crate::ports::{ArtifactStore, StoredItem};

/// Suffix of in-flight uploads; such files are hidden from listings.
const TEMP_SUFFIX: &str = ".upload.tmp";

#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the models directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), ArtifactError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            ArtifactError::io(format!(
                "Failed to create models directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    fn absolute(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn lookup(&self, relative: &Path) -> Result<StoredItem, ArtifactError> {
        let path = self.absolute(relative);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Ok(StoredItem::Directory(path)),
            Ok(_) => Ok(StoredItem::File(path)),
            Err(_) => Err(ArtifactError::NotFound(relative.display().to_string())),
        }
    }

    async fn list(&self, relative: &Path) -> Result<Vec<ArtifactEntry>, ArtifactError> {
        let root = self.root.clone();
        let dir = self.absolute(relative);
        tokio::task::spawn_blocking(move || scan(&root, &dir))
            .await
            .map_err(|e| ArtifactError::io(format!("Directory scan aborted: {}", e)))?
    }

    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ArtifactError> {
        self.ensure_root().await?;

        let final_path = self.root.join(filename);
        let temp_path = self.root.join(format!("{}{}", filename, TEMP_SUFFIX));

        let mut file = tokio::fs::File::create(&temp_path).await.map_err(|e| {
            ArtifactError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(bytes).await.map_err(|e| {
            ArtifactError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            ArtifactError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        tokio::fs::rename(&temp_path, &final_path).await.map_err(|e| {
            ArtifactError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        Ok(final_path)
    }
}

/// Entries of `dir` in directory order, skipping in-flight uploads.
fn scan(root: &Path, dir: &Path) -> Result<Vec<ArtifactEntry>, ArtifactError> {
    let read_dir = fs::read_dir(dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::NotFound(dir.display().to_string())
        } else {
            ArtifactError::io(format!("Failed to read {}: {}", dir.display(), e))
        }
    })?;

    let mut entries = Vec::new();
    for item in read_dir {
        let item = item.map_err(|e| ArtifactError::io(e.to_string()))?;
        let name = item.file_name().to_string_lossy().into_owned();
        if name.ends_with(TEMP_SUFFIX) {
            continue;
        }

        let path = item.path();
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            // Vanished between listing and stat.
            Err(_) => continue,
        };

        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = meta.created().unwrap_or(modified);
        let size_bytes = total_size(&path, &meta);

        entries.push(ArtifactEntry {
            name,
            rel_path: relative_path(root, &path),
            is_dir: meta.is_dir(),
            created_time: DateTime::<Utc>::from(created),
            modified_time: DateTime::<Utc>::from(modified),
            size_bytes,
            size: human_readable_size(size_bytes),
            path,
        });
    }

    Ok(entries)
}

/// Size of a file, or of a directory itself plus everything below it.
fn total_size(path: &Path, meta: &fs::Metadata) -> u64 {
    let mut total = meta.len();
    if meta.is_dir() {
        if let Ok(children) = fs::read_dir(path) {
            for child in children.flatten() {
                let child_path = child.path();
                if let Ok(child_meta) = fs::metadata(&child_path) {
                    total += total_size(&child_path, &child_meta);
                }
            }
        }
    }
    total
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
