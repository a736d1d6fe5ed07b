//! Output JSON schema definitions for flow profiles.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{largest_directories, FlowEdge, FlowGraph, FlowNode, LargestDirectory};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level profile structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowProfile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Report the profile was built from
    pub source: String,

    /// Directories at or below this size were dropped
    pub threshold_gb: f64,

    /// Common root of all measured directories
    pub root: String,

    /// Resolved size of the root (GB)
    pub total_size: f64,

    pub measured_count: usize,
    pub synthesized_count: usize,

    /// Largest measured directories
    pub largest: Vec<LargestDirectory>,

    /// Ordered nodes (root first)
    pub nodes: Vec<FlowNode>,

    /// Parent -> child flows, indexing into `nodes`
    pub edges: Vec<FlowEdge>,

    /// Timestamp when profile was generated
    pub generated_at: String,
}

impl FlowProfile {
    /// Rebuild the flow graph this profile was created from
    pub fn to_graph(&self) -> FlowGraph {
        FlowGraph {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}

/// Convert a flow graph to output profile format
///
/// **Public** - used by commands to create final output
pub fn to_profile(graph: &FlowGraph, source: &str, threshold_gb: f64, top_n: usize) -> FlowProfile {
    use chrono::Utc;

    FlowProfile {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        threshold_gb,
        root: graph.root().map(|n| n.path.clone()).unwrap_or_default(),
        total_size: graph.total_size(),
        measured_count: graph.measured_count(),
        synthesized_count: graph.synthesized_count(),
        largest: largest_directories(graph, top_n),
        nodes: graph.nodes.clone(),
        edges: graph.edges.clone(),
        generated_at: Utc::now().to_rfc3339(),
    }
}
