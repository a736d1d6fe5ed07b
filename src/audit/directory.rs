//! Per-directory audit record: owner, permissions and timestamps.

use super::owner::{lookup_owner, permission_string};
use crate::utils::error::AuditError;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Stat information for one directory
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryAudit {
    pub path: PathBuf,
    pub owner: String,
    pub full_name: String,
    pub permissions: String,
    pub accessed: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub changed: DateTime<Utc>,
}

impl DirectoryAudit {
    /// Collect audit information for `path`
    ///
    /// # Errors
    /// * `AuditError::Stat` - the path cannot be stat'ed
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let stat = std::fs::metadata(path).map_err(|source| AuditError::Stat {
            path: path.display().to_string(),
            source,
        })?;

        let owner = lookup_owner(&stat);
        let (accessed, modified, changed) = timestamps(&stat);

        debug!("Audited {} (owner {})", path.display(), owner.name);

        Ok(Self {
            path: path.to_path_buf(),
            owner: owner.name,
            full_name: owner.full_name,
            permissions: permission_string(&stat),
            accessed,
            modified,
            changed,
        })
    }
}

impl fmt::Display for DirectoryAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DirectoryAudit(")?;
        writeln!(f, "    path={},", self.path.display())?;
        writeln!(f, "    owner={},", self.owner)?;
        writeln!(f, "    full_name={},", self.full_name)?;
        writeln!(f, "    permissions={},", self.permissions)?;
        writeln!(f, "    a_time={},", self.accessed.to_rfc3339())?;
        writeln!(f, "    m_time={},", self.modified.to_rfc3339())?;
        writeln!(f, "    c_time={}", self.changed.to_rfc3339())?;
        write!(f, ")")
    }
}

#[cfg(unix)]
fn timestamps(stat: &Metadata) -> (DateTime<Utc>, DateTime<Utc>, DateTime<Utc>) {
    use std::os::unix::fs::MetadataExt;

    let at = |secs: i64, nanos: i64| {
        DateTime::<Utc>::from_timestamp(secs, nanos.clamp(0, 999_999_999) as u32).unwrap_or_default()
    };
    (
        at(stat.atime(), stat.atime_nsec()),
        at(stat.mtime(), stat.mtime_nsec()),
        at(stat.ctime(), stat.ctime_nsec()),
    )
}

#[cfg(not(unix))]
fn timestamps(stat: &Metadata) -> (DateTime<Utc>, DateTime<Utc>, DateTime<Utc>) {
    let to_utc = |t: std::io::Result<std::time::SystemTime>| {
        t.map(DateTime::<Utc>::from).unwrap_or_default()
    };
    let modified = to_utc(stat.modified());
    (to_utc(stat.accessed()), modified, modified)
}

/// Full name of the owner of `path`
///
/// **Public** - backs the `whose` command
pub fn owner_full_name(path: impl AsRef<Path>) -> Result<String, AuditError> {
    let path = path.as_ref();
    let stat = std::fs::metadata(path).map_err(|source| AuditError::Stat {
        path: path.display().to_string(),
        source,
    })?;
    Ok(lookup_owner(&stat).full_name)
}
