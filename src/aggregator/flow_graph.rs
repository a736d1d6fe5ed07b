//! Flow graph construction: records in, ordered nodes and edges out.
//!
//! Pipeline:
//! 1. Resolve the common root
//! 2. Expand every record into its ancestor chain
//! 3. Aggregate sizes for synthesized directories
//! 4. Order nodes by depth, then path
//! 5. Link every node to its parent

use super::expander::expand_candidates;
use super::links::{build_links, check_size, FlowEdge};
use super::ordering::order_nodes;
use super::record::PathRecord;
use super::root::resolve_common_root;
use super::sizes::aggregate_sizes;
use crate::utils::error::HierarchyError;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A directory in the finished flow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Absolute path
    pub path: String,

    /// Display name (last path segment)
    pub label: String,

    /// Resolved size
    pub size: f64,

    /// False for directories synthesized from their children
    pub is_measured: bool,

    /// Segments below the common root (0 for the root)
    pub depth: usize,
}

/// Ordered nodes plus parent -> child edges, ready for a Sankey renderer
///
/// The common root is always `nodes[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn root(&self) -> Option<&FlowNode> {
        self.nodes.first()
    }

    /// Resolved size of the common root
    pub fn total_size(&self) -> f64 {
        self.root().map(|n| n.size).unwrap_or(0.0)
    }

    pub fn measured_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_measured).count()
    }

    pub fn synthesized_count(&self) -> usize {
        self.nodes.len() - self.measured_count()
    }

    /// Deepest level below the root
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Positions of the direct children of `position`, in node order
    ///
    /// Scans every edge; use `children_map` when visiting many nodes.
    pub fn children(&self, position: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|e| e.source == position)
            .map(|e| e.target)
            .collect()
    }

    /// Direct children of every node, indexed by position, in node order
    ///
    /// Edges pointing outside the node list are ignored.
    pub fn children_map(&self) -> Vec<Vec<usize>> {
        let mut map = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            if edge.source < map.len() && edge.target < map.len() {
                map[edge.source].push(edge.target);
            }
        }
        map
    }

    /// Label with size, e.g. `proj (30 GB)`; the root shows its full path
    pub fn display_label(&self, position: usize) -> String {
        let node = &self.nodes[position];
        let name = if position == 0 { &node.path } else { &node.label };
        format!("{} ({} GB)", name, format_size(node.size))
    }
}

/// Format a size without trailing zeros for whole numbers
pub fn format_size(size: f64) -> String {
    if size.fract() == 0.0 && size.abs() < 1e15 {
        format!("{}", size as i64)
    } else {
        format!("{:.2}", size)
    }
}

/// Build the flow graph for a set of measured directories
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `records` - Measured directories, in any order
///
/// # Returns
/// Nodes ordered by (depth, path) with resolved sizes, and one edge per
/// non-root node
///
/// # Errors
/// * `HierarchyError::EmptyInput` - no records
/// * `HierarchyError::NegativeSize` - a record or aggregate is negative or
///   non-finite (including sums that overflow to infinity)
/// * `HierarchyError::DuplicatePath` - a path appears twice
/// * `HierarchyError::IncompleteHierarchy` - internal consistency failure
///
/// # Example
/// ```
/// use damply::aggregator::{build_flow_graph, PathRecord};
///
/// let records = vec![
///     PathRecord::parse("/data/proj/a", 10.0).unwrap(),
///     PathRecord::parse("/data/other", 5.0).unwrap(),
/// ];
/// let graph = build_flow_graph(&records).unwrap();
/// assert_eq!(graph.nodes[0].path, "/data");
/// assert_eq!(graph.total_size(), 15.0);
/// ```
pub fn build_flow_graph(records: &[PathRecord]) -> Result<FlowGraph, HierarchyError> {
    for record in records {
        check_size(&record.path, record.size)?;
    }

    let root = resolve_common_root(records)?;
    info!("Common root: {}", root);

    let mut set = expand_candidates(records, &root)?;
    aggregate_sizes(&mut set, &root)?;
    let set = order_nodes(set);
    let edges = build_links(&set, &root)?;

    let root_depth = root.depth();
    let nodes: Vec<FlowNode> = set
        .nodes()
        .iter()
        .map(|node| FlowNode {
            path: node.path.to_string(),
            label: node.path.name().to_string(),
            size: node.size,
            is_measured: node.measured,
            depth: node.path.depth() - root_depth,
        })
        .collect();

    debug!(
        "Flow graph: {} nodes ({} synthesized), {} edges",
        nodes.len(),
        nodes.iter().filter(|n| !n.is_measured).count(),
        edges.len()
    );

    Ok(FlowGraph { nodes, edges })
}
