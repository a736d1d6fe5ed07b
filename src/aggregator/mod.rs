//! Aggregation of measured directory sizes into a flow graph.
//!
//! This module transforms a flat list of measured directories into:
//! - A complete directory hierarchy rooted at their common ancestor
//! - Resolved sizes for directories that were never measured
//! - Ordered nodes and parent -> child edges (for Sankey rendering)
//! - Size statistics

pub mod path;
pub mod record;
pub mod root;
pub mod expander;
pub mod sizes;
pub mod ordering;
pub mod links;
pub mod flow_graph;
pub mod metrics;

// Re-export main types and functions
pub use path::DirPath;
pub use record::PathRecord;
pub use root::resolve_common_root;
pub use expander::{ancestors_to_root, expand_candidates, Node, NodeSet};
pub use sizes::aggregate_sizes;
pub use ordering::{order_key, order_nodes};
pub use links::{build_links, FlowEdge};
pub use flow_graph::{build_flow_graph, format_size, FlowGraph, FlowNode};
pub use metrics::{calculate_size_distribution, largest_directories, LargestDirectory, SizeDistribution};
