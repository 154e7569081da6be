//! BrowseArtifacts - Query handler resolving GET paths of the model server.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::artifacts::{latest, ArtifactEntry, ArtifactError, RequestedPath};
use crate::ports::{ArtifactStore, StoredItem};

#[derive(Debug, Clone)]
pub struct BrowseArtifactsQuery {
    /// URL path below the server root, possibly containing `@latest`.
    pub path: String,
    /// Whether the request carried a valid API key.
    pub authorized: bool,
}

/// What to send back for a GET request.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactView {
    Download {
        path: PathBuf,
        filename: String,
    },
    Listing {
        /// Directory being listed, relative to the models directory.
        rel_path: String,
        /// Parent directory, `None` at the root.
        parent_path: Option<String>,
        entries: Vec<ArtifactEntry>,
    },
}

pub struct BrowseArtifactsHandler {
    store: Arc<dyn ArtifactStore>,
}

impl BrowseArtifactsHandler {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// Files are downloadable by anyone; directory listings need the API key.
    /// `dir/@latest` serves the most recently modified entry of `dir`.
    pub async fn handle(&self, query: BrowseArtifactsQuery) -> Result<ArtifactView, ArtifactError> {
        let requested = RequestedPath::parse(&query.path)?;

        match self.store.lookup(&requested.relative).await? {
            StoredItem::File(path) => Ok(download(path)),
            StoredItem::Directory(_) if requested.latest => {
                let entries = self.store.list(&requested.relative).await?;
                let newest = latest(&entries)
                    .cloned()
                    .ok_or_else(|| ArtifactError::NoArtifacts(query.path.clone()))?;
                tracing::info!(entry = %newest.rel_path, "Serving latest model");

                if newest.is_dir {
                    let relative = PathBuf::from(&newest.rel_path);
                    self.listing(relative, query.authorized).await
                } else {
                    Ok(download(newest.path))
                }
            }
            StoredItem::Directory(_) => self.listing(requested.relative, query.authorized).await,
        }
    }

    async fn listing(&self, relative: PathBuf, authorized: bool) -> Result<ArtifactView, ArtifactError> {
        if !authorized {
            return Err(ArtifactError::Unauthorized);
        }
        let entries = self.store.list(&relative).await?;

        let rel_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let parent_path = if rel_path.is_empty() {
            None
        } else {
            Some(
                relative
                    .parent()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default(),
            )
        };

        Ok(ArtifactView::Listing {
            rel_path,
            parent_path,
            entries,
        })
    }
}

fn download(path: PathBuf) -> ArtifactView {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ArtifactView::Download { path, filename }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalArtifactStore;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn handler() -> (TempDir, BrowseArtifactsHandler) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(LocalArtifactStore::new(dir.path()));
        (dir, BrowseArtifactsHandler::new(store))
    }

    fn query(path: &str, authorized: bool) -> BrowseArtifactsQuery {
        BrowseArtifactsQuery {
            path: path.to_string(),
            authorized,
        }
    }

    #[tokio::test]
    async fn file_download_needs_no_key() {
        let (dir, handler) = handler();
        fs::write(dir.path().join("m.tar.gz"), b"x").unwrap();

        let view = handler.handle(query("m.tar.gz", false)).await.unwrap();
        assert_eq!(
            view,
            ArtifactView::Download {
                path: dir.path().join("m.tar.gz"),
                filename: "m.tar.gz".into()
            }
        );
    }

    #[tokio::test]
    async fn listing_requires_key() {
        let (dir, handler) = handler();
        fs::create_dir(dir.path().join("core")).unwrap();

        assert_eq!(
            handler.handle(query("core", false)).await,
            Err(ArtifactError::Unauthorized)
        );
        assert_eq!(
            handler.handle(query("", false)).await,
            Err(ArtifactError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn listing_reports_parent() {
        let (dir, handler) = handler();
        fs::create_dir_all(dir.path().join("core/v1")).unwrap();

        match handler.handle(query("core/v1", true)).await.unwrap() {
            ArtifactView::Listing {
                rel_path,
                parent_path,
                entries,
            } => {
                assert_eq!(rel_path, "core/v1");
                assert_eq!(parent_path.as_deref(), Some("core"));
                assert!(entries.is_empty());
            }
            other => panic!("unexpected view: {:?}", other),
        }

        match handler.handle(query("", true)).await.unwrap() {
            ArtifactView::Listing { parent_path, .. } => assert_eq!(parent_path, None),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn latest_serves_newest_file() {
        let (dir, handler) = handler();
        let core = dir.path().join("core");
        fs::create_dir(&core).unwrap();
        for name in ["t1.tar.gz", "t2.tar.gz", "t3.tar.gz"] {
            fs::write(core.join(name), b"x").unwrap();
            std::thread::sleep(Duration::from_millis(20));
        }

        match handler.handle(query("core/@latest", false)).await.unwrap() {
            ArtifactView::Download { filename, .. } => assert_eq!(filename, "t3.tar.gz"),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn latest_of_empty_directory_is_no_artifacts() {
        let (dir, handler) = handler();
        fs::create_dir(dir.path().join("empty")).unwrap();

        assert!(matches!(
            handler.handle(query("empty/@latest", true)).await,
            Err(ArtifactError::NoArtifacts(_))
        ));
    }

    #[tokio::test]
    async fn unknown_and_escaping_paths_are_not_found() {
        let (_dir, handler) = handler();
        assert!(matches!(
            handler.handle(query("missing.tar.gz", true)).await,
            Err(ArtifactError::NotFound(_))
        ));
        assert!(matches!(
            handler.handle(query("../etc/passwd", true)).await,
            Err(ArtifactError::NotFound(_))
        ));
    }
}
