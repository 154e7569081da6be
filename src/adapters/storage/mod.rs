//! Storage Adapters
//!
//! Implementations of the ArtifactStore port.
//!
//! ## Available Adapters
//!
//! - **LocalArtifactStore** - Serves and stores model archives in a local directory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::LocalArtifactStore;
//!
//! let store = LocalArtifactStore::new("./models");
//! let entries = store.list(Path::new("")).await?;
//! ```

mod local_artifact_store;

pub use local_artifact_store::LocalArtifactStore;
