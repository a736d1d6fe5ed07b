//! Platform-independent absolute directory paths.
//!
//! A `DirPath` is a sequence of path segments below the filesystem root.
//! Ancestry is computed structurally on the segments, so nothing here
//! touches the OS or depends on its separator conventions.

use crate::utils::error::HierarchyError;
use std::fmt;
use std::str::FromStr;

/// An absolute directory path, stored as its segments
///
/// `/` has zero segments; `/data/proj` has two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DirPath {
    segments: Vec<String>,
}

impl DirPath {
    /// The filesystem root `/`
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse an absolute path string
    ///
    /// Repeated separators, trailing separators and `.` segments are
    /// ignored. Relative paths and `..` segments are rejected, since
    /// resolving them would need the filesystem.
    pub fn parse(raw: &str) -> Result<Self, HierarchyError> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('/') {
            return Err(HierarchyError::InvalidPath(format!(
                "'{}' is not absolute",
                raw
            )));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    return Err(HierarchyError::InvalidPath(format!(
                        "'{}' contains a '..' segment",
                        raw
                    )))
                }
                other => segments.push(other.to_string()),
            }
        }

        Ok(Self { segments })
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments below `/`
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Immediate parent, or `None` for `/`
    pub fn parent(&self) -> Option<DirPath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Last segment, or `/` for the filesystem root
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("/")
    }

    /// True if `ancestor` equals this path or is one of its ancestors
    ///
    /// Matching is per segment: `/data/ab` is not an ancestor of `/data/abc`.
    pub fn starts_with(&self, ancestor: &DirPath) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }

    /// Longest path that both `self` and `other` start with
    pub fn common_prefix(&self, other: &DirPath) -> DirPath {
        let shared = self
            .segments
            .iter()
            .zip(other.segments.iter())
            .take_while(|(a, b)| a == b)
            .count();

        Self {
            segments: self.segments[..shared].to_vec(),
        }
    }
}

impl fmt::Display for DirPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for DirPath {
    type Err = HierarchyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
