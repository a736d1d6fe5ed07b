//! Size aggregation for synthesized directories.
//!
//! Nodes are visited deepest-first, so every child is final before its
//! parent sums it. This keeps chains of unmeasured directories correct in
//! a single pass.

use super::expander::NodeSet;
use super::path::DirPath;
use crate::utils::error::HierarchyError;
use log::debug;

/// Resolve the size of every unmeasured node in `set`
///
/// **Public** - third stage of flow graph construction
///
/// Measured nodes keep their size, including a measured root. Each
/// unmeasured node becomes the sum of its direct children.
///
/// # Errors
/// * `HierarchyError::IncompleteHierarchy` - a node lies outside `root` or
///   its parent is missing from the set
pub fn aggregate_sizes(set: &mut NodeSet, root: &DirPath) -> Result<(), HierarchyError> {
    let children = child_positions(set, root)?;

    let mut order: Vec<usize> = (0..set.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(set.nodes()[i].path.depth()));

    let mut synthesized = 0usize;
    for position in order {
        if set.nodes()[position].measured {
            continue;
        }
        let total: f64 = children[position]
            .iter()
            .map(|&child| set.nodes()[child].size)
            .sum();
        set.set_size(position, total);
        synthesized += 1;
    }

    debug!("Aggregated sizes for {} synthesized directories", synthesized);

    Ok(())
}

/// Direct children of every node, by position
///
/// Also verifies that each non-root node is under `root` and has its
/// parent in the set. Parents are strictly shallower, so this is enough
/// for every chain to reach `root`.
pub(crate) fn child_positions(
    set: &NodeSet,
    root: &DirPath,
) -> Result<Vec<Vec<usize>>, HierarchyError> {
    let mut children = vec![Vec::new(); set.len()];

    for (position, node) in set.nodes().iter().enumerate() {
        if node.path == *root {
            continue;
        }
        let parent = parent_position(set, &node.path, root)?;
        children[parent].push(position);
    }

    Ok(children)
}

/// Position of the immediate parent of `path`, which must lie under `root`
pub(crate) fn parent_position(
    set: &NodeSet,
    path: &DirPath,
    root: &DirPath,
) -> Result<usize, HierarchyError> {
    let incomplete = || HierarchyError::IncompleteHierarchy {
        path: path.to_string(),
    };

    if !path.starts_with(root) {
        return Err(incomplete());
    }

    path.parent()
        .and_then(|parent| set.index_of(&parent))
        .ok_or_else(incomplete)
}
