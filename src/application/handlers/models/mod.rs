//! Model server handlers.

mod browse_artifacts;
mod upload_artifact;

pub use browse_artifacts::{ArtifactView, BrowseArtifactsHandler, BrowseArtifactsQuery};
pub use upload_artifact::{UploadArtifactCommand, UploadArtifactHandler, UploadArtifactResult};
