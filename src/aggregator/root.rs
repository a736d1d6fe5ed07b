//! Common root resolution.

use super::path::DirPath;
use super::record::PathRecord;
use crate::utils::error::HierarchyError;
use log::debug;

/// Resolve the longest directory path shared by every record
///
/// **Public** - first stage of flow graph construction
///
/// Matching is done on whole segments, so `/data/ab` and `/data/abc`
/// resolve to `/data`. A single record (or identical records) resolves
/// to that record's own path.
///
/// # Errors
/// * `HierarchyError::EmptyInput` - no records supplied
pub fn resolve_common_root(records: &[PathRecord]) -> Result<DirPath, HierarchyError> {
    let (first, rest) = records.split_first().ok_or(HierarchyError::EmptyInput)?;

    let root = rest
        .iter()
        .fold(first.path.clone(), |acc, record| acc.common_prefix(&record.path));

    debug!("Resolved common root {} from {} records", root, records.len());

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(paths: &[&str]) -> Vec<PathRecord> {
        paths
            .iter()
            .map(|p| PathRecord::parse(p, 1.0).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(resolve_common_root(&[]), Err(HierarchyError::EmptyInput));
    }

    #[test]
    fn test_partial_segment_is_not_a_root() {
        let root = resolve_common_root(&records(&["/data/ab", "/data/abc"])).unwrap();
        assert_eq!(root.to_string(), "/data");
    }

    #[test]
    fn test_single_record_is_its_own_root() {
        let root = resolve_common_root(&records(&["/x/y"])).unwrap();
        assert_eq!(root.to_string(), "/x/y");
    }

    #[test]
    fn test_disjoint_trees_resolve_to_filesystem_root() {
        let root = resolve_common_root(&records(&["/home/a", "/scratch/b"])).unwrap();
        assert!(root.is_root());
    }

    #[test]
    fn test_root_is_maximal() {
        let input = records(&["/data/proj/a", "/data/proj/b/c", "/data/proj"]);
        let root = resolve_common_root(&input).unwrap();
        assert_eq!(root.to_string(), "/data/proj");

        for record in &input {
            assert!(record.path.starts_with(&root));
        }
    }
}
