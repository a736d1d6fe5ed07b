//! Parent -> child edges for the flow diagram.

use super::expander::NodeSet;
use super::path::DirPath;
use super::sizes::parent_position;
use crate::utils::error::HierarchyError;
use log::debug;
use serde::{Deserialize, Serialize};

/// A weighted flow from a directory to one of its children
///
/// Indices refer to positions in the ordered node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

/// Emit one edge per non-root node, from its immediate parent
///
/// **Public** - final stage of flow graph construction
///
/// Edges to the root's direct children fall out of the same rule, so the
/// root always has outgoing flow and no extra root edges are needed.
///
/// # Errors
/// * `HierarchyError::NegativeSize` - a resolved size is negative or NaN
/// * `HierarchyError::IncompleteHierarchy` - a parent is missing
pub fn build_links(set: &NodeSet, root: &DirPath) -> Result<Vec<FlowEdge>, HierarchyError> {
    let mut edges = Vec::with_capacity(set.len().saturating_sub(1));

    for (target, node) in set.nodes().iter().enumerate() {
        check_size(&node.path, node.size)?;

        if node.path == *root {
            continue;
        }

        let source = parent_position(set, &node.path, root)?;
        edges.push(FlowEdge {
            source,
            target,
            value: node.size,
        });
    }

    debug!("Built {} edges for {} nodes", edges.len(), set.len());

    Ok(edges)
}

/// Reject sizes that cannot be drawn as a flow width
pub(crate) fn check_size(path: &DirPath, size: f64) -> Result<(), HierarchyError> {
    if size.is_finite() && size >= 0.0 {
        Ok(())
    } else {
        Err(HierarchyError::NegativeSize {
            path: path.to_string(),
            size,
        })
    }
}
