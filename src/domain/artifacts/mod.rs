//! Model artifact directory: entries, naming rules and request paths.

mod entry;
mod errors;
mod naming;

pub use entry::{human_readable_size, latest, ArtifactEntry};
pub use errors::ArtifactError;
pub use naming::{allowed_file, secure_filename, RequestedPath, LATEST_MARKER};
