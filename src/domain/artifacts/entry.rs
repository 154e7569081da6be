//! Directory entries of the model store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const SIZE_RADIX: f64 = 1024.0;

/// One child of a scanned directory. Computed on demand, never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactEntry {
    pub name: String,
    #[serde(skip)]
    pub path: PathBuf,
    /// Path relative to the models directory, `/`-separated.
    pub rel_path: String,
    pub is_dir: bool,
    pub created_time: DateTime<Utc>,
    pub modified_time: DateTime<Utc>,
    /// Size in bytes; for directories the recursive total.
    pub size_bytes: u64,
    /// Human readable form of `size_bytes`.
    pub size: String,
}

/// Formats a byte count with two decimals in binary units, e.g. `1.50 KB`.
pub fn human_readable_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in &SIZE_UNITS[..SIZE_UNITS.len() - 1] {
        if size < SIZE_RADIX {
            return format!("{:.2} {}", size, unit);
        }
        size /= SIZE_RADIX;
    }
    format!("{:.2} {}", size, SIZE_UNITS[SIZE_UNITS.len() - 1])
}

/// Entry with the greatest modification time; ties go to the earliest in
/// scan order.
pub fn latest(entries: &[ArtifactEntry]) -> Option<&ArtifactEntry> {
    entries.iter().fold(None, |best: Option<&ArtifactEntry>, entry| match best {
        Some(current) if current.modified_time >= entry.modified_time => Some(current),
        _ => Some(entry),
    })
}
