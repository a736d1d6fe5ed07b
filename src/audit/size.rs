//! On-disk size of a directory tree.

use crate::utils::error::AuditError;
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Total size in bytes of every regular file below `path`
///
/// Symlinks are not followed. Entries that vanish or cannot be read
/// during the walk are skipped.
///
/// # Errors
/// * `AuditError::Stat` - `path` itself cannot be stat'ed
pub fn directory_size(path: impl AsRef<Path>) -> Result<u64, AuditError> {
    let path = path.as_ref();
    std::fs::symlink_metadata(path).map_err(|source| AuditError::Stat {
        path: path.display().to_string(),
        source,
    })?;

    let mut total = 0u64;
    let mut skipped = 0usize;

    for entry in WalkDir::new(path).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => total += metadata.len(),
            Err(e) => {
                debug!("Skipping {}: {}", entry.path().display(), e);
                skipped += 1;
            }
        }
    }

    debug!(
        "{} holds {} bytes ({} entries skipped)",
        path.display(),
        total,
        skipped
    );
    Ok(total)
}

/// Human-readable byte count in powers of 1024, e.g. `1.50 KB`
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
