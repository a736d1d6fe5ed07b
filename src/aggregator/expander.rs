//! Ancestor expansion: turn measured records into the full candidate node set.
//!
//! Every directory between a measured path and the common root becomes a
//! node, even if it was never measured itself. The resulting `NodeSet` is
//! complete before any size is aggregated over it.

use super::path::DirPath;
use super::record::PathRecord;
use crate::utils::error::HierarchyError;
use log::debug;
use std::collections::HashMap;

/// A directory in the hierarchy under construction
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub path: DirPath,

    /// Measured size, or the aggregate of children once resolved
    pub size: f64,

    /// False for directories synthesized only because they are ancestors
    pub measured: bool,
}

/// Nodes plus a path -> position index
///
/// **Public** - shared by the aggregator, orderer and link builder
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    nodes: Vec<Node>,
    index: HashMap<DirPath, usize>,
}

impl NodeSet {
    /// Build a set from nodes, indexing them by path
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.path.clone(), i))
            .collect();
        Self { nodes, index }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn index_of(&self, path: &DirPath) -> Option<usize> {
        self.index.get(path).copied()
    }

    pub fn get(&self, path: &DirPath) -> Option<&Node> {
        self.index_of(path).map(|i| &self.nodes[i])
    }

    pub(crate) fn set_size(&mut self, position: usize, size: f64) {
        self.nodes[position].size = size;
    }

    /// Insert a measured node, promoting a placeholder if one exists
    fn insert_measured(&mut self, record: &PathRecord) -> Result<(), HierarchyError> {
        match self.index_of(&record.path) {
            Some(i) if self.nodes[i].measured => Err(HierarchyError::DuplicatePath {
                path: record.path.to_string(),
            }),
            Some(i) => {
                self.nodes[i].size = record.size;
                self.nodes[i].measured = true;
                Ok(())
            }
            None => {
                self.push(Node {
                    path: record.path.clone(),
                    size: record.size,
                    measured: true,
                });
                Ok(())
            }
        }
    }

    /// Insert an unmeasured placeholder unless the path is already present
    fn insert_placeholder(&mut self, path: &DirPath) {
        if self.index.contains_key(path) {
            return;
        }
        self.push(Node {
            path: path.clone(),
            size: 0.0,
            measured: false,
        });
    }

    fn push(&mut self, node: Node) {
        self.index.insert(node.path.clone(), self.nodes.len());
        self.nodes.push(node);
    }
}

/// Ancestor chain of `path`, from `path` itself up to and including `root`
///
/// **Public** - used by `expand_candidates` and handy for diagnostics
///
/// Stops at the filesystem root. If `path` does not lie under `root`,
/// the chain ends at `/` without reaching `root`; the aggregator reports
/// such nodes as an incomplete hierarchy.
pub fn ancestors_to_root(path: &DirPath, root: &DirPath) -> Vec<DirPath> {
    let mut chain = vec![path.clone()];
    let mut current = path.clone();

    while current != *root {
        match current.parent() {
            Some(parent) => {
                chain.push(parent.clone());
                current = parent;
            }
            None => break,
        }
    }

    chain
}

/// Build the complete candidate node set for `records` under `root`
///
/// **Public** - second stage of flow graph construction
///
/// Measured records become measured nodes; every ancestor down to `root`
/// becomes an unmeasured placeholder. `root` is always present. A record
/// whose path is `root` makes the root measured.
///
/// # Errors
/// * `HierarchyError::DuplicatePath` - two records share a path
pub fn expand_candidates(
    records: &[PathRecord],
    root: &DirPath,
) -> Result<NodeSet, HierarchyError> {
    let mut set = NodeSet::default();

    for record in records {
        set.insert_measured(record)?;
    }

    set.insert_placeholder(root);

    for record in records {
        for ancestor in ancestors_to_root(&record.path, root).iter().skip(1) {
            set.insert_placeholder(ancestor);
        }
    }

    debug!(
        "Expanded {} records into {} candidate nodes",
        records.len(),
        set.len()
    );

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> DirPath {
        DirPath::parse(raw).unwrap()
    }

    #[test]
    fn test_ancestors_include_path_and_root() {
        let chain = ancestors_to_root(&path("/data/proj/a"), &path("/data"));
        let rendered: Vec<String> = chain.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["/data/proj/a", "/data/proj", "/data"]);
    }

    #[test]
    fn test_ancestors_terminate_at_filesystem_root() {
        let chain = ancestors_to_root(&path("/a/b"), &DirPath::root());
        assert_eq!(chain.len(), 3);
        assert!(chain.last().unwrap().is_root());
    }

    #[test]
    fn test_ancestors_outside_root_stop_at_slash() {
        let chain = ancestors_to_root(&path("/other/x"), &path("/data"));
        assert!(chain.last().unwrap().is_root());
        assert!(!chain.contains(&path("/data")));
    }

    #[test]
    fn test_expand_tags_measured_and_placeholders() {
        let records = vec![
            PathRecord::parse("/data/proj/a", 10.0).unwrap(),
            PathRecord::parse("/data/other", 5.0).unwrap(),
        ];
        let set = expand_candidates(&records, &path("/data")).unwrap();

        assert_eq!(set.len(), 4);
        assert!(set.get(&path("/data/proj/a")).unwrap().measured);
        assert!(!set.get(&path("/data/proj")).unwrap().measured);
        assert!(!set.get(&path("/data")).unwrap().measured);
        assert!(set.get(&path("/")).is_none());
    }

    #[test]
    fn test_record_at_root_is_measured_root() {
        let records = vec![
            PathRecord::parse("/a/b", 50.0).unwrap(),
            PathRecord::parse("/a/b/c", 10.0).unwrap(),
        ];
        let set = expand_candidates(&records, &path("/a/b")).unwrap();

        assert_eq!(set.len(), 2);
        let root = set.get(&path("/a/b")).unwrap();
        assert!(root.measured);
        assert_eq!(root.size, 50.0);
    }

    #[test]
    fn test_duplicate_record_rejected() {
        let records = vec![
            PathRecord::parse("/a/b", 1.0).unwrap(),
            PathRecord::parse("/a/b/", 2.0).unwrap(),
        ];
        let result = expand_candidates(&records, &path("/a/b"));
        assert_eq!(
            result.unwrap_err(),
            HierarchyError::DuplicatePath {
                path: "/a/b".to_string()
            }
        );
    }
}
