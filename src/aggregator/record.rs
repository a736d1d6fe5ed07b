//! Measured directory sizes, as supplied by a report loader.

use super::path::DirPath;
use crate::utils::error::HierarchyError;

/// A directory that was actually measured
///
/// **Public** - produced by the report loader, consumed by the graph builder
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    /// Absolute directory path
    pub path: DirPath,

    /// Measured size (GB in reports produced by `damply audit` runs)
    pub size: f64,
}

impl PathRecord {
    pub fn new(path: DirPath, size: f64) -> Self {
        Self { path, size }
    }

    /// Build a record from a raw absolute path string
    pub fn parse(raw_path: &str, size: f64) -> Result<Self, HierarchyError> {
        Ok(Self::new(DirPath::parse(raw_path)?, size))
    }
}
