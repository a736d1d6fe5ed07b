//! Deterministic node ordering.

use super::expander::NodeSet;
use super::path::DirPath;

/// Sort key: segment count first, then the path string
pub fn order_key(path: &DirPath) -> (usize, String) {
    (path.depth(), path.to_string())
}

/// Reorder `set` so the renderer gets the same node indices on every run
///
/// **Public** - fourth stage of flow graph construction
///
/// The common root has the fewest segments of any node, so it always
/// lands at position 0.
pub fn order_nodes(set: NodeSet) -> NodeSet {
    let mut nodes = set.into_nodes();
    nodes.sort_by_cached_key(|node| order_key(&node.path));
    NodeSet::from_nodes(nodes)
}
