//! Upload filename checks and request path parsing.

use std::path::{Component, Path, PathBuf};

use super::errors::ArtifactError;

/// Marker in a request path asking for the newest entry of a directory.
pub const LATEST_MARKER: &str = "@latest";

/// True when `filename` has a non-empty stem and ends with one of the
/// allowed extensions (case-insensitive).
pub fn allowed_file(filename: &str, allowed_extensions: &[String]) -> bool {
    let lower = filename.to_lowercase();
    allowed_extensions.iter().any(|ext| {
        let suffix = format!(".{}", ext.trim_start_matches('.').to_lowercase());
        lower.len() > suffix.len() && lower.ends_with(&suffix)
    })
}

/// Reduces a client supplied filename to a safe single path component.
///
/// Path separators become spaces, whitespace runs become `_`, and only ASCII
/// alphanumerics plus `.`, `_` and `-` survive. Leading and trailing dots and
/// underscores are stripped, so `..` and hidden names cannot result. Returns
/// `None` when nothing is left.
pub fn secure_filename(filename: &str) -> Option<String> {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A GET path below the models directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedPath {
    /// Relative path with the `@latest` marker removed.
    pub relative: PathBuf,
    pub latest: bool,
}

impl RequestedPath {
    /// Parses a URL path. Anything that could leave the models directory
    /// (parent components, absolute or prefixed paths) is reported as not
    /// found.
    pub fn parse(raw: &str) -> Result<Self, ArtifactError> {
        let latest = raw.contains(LATEST_MARKER);
        let stripped = raw.replace(LATEST_MARKER, "");

        let mut relative = PathBuf::new();
        for component in Path::new(stripped.trim_start_matches('/')).components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(ArtifactError::NotFound(raw.to_string()))
                }
            }
        }

        Ok(Self { relative, latest })
    }
}
