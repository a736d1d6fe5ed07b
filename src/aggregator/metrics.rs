//! Storage metrics over a finished flow graph.
//!
//! The largest measured directories are the first places to look when
//! reclaiming space.

use super::flow_graph::{format_size, FlowGraph};
use log::debug;
use serde::{Deserialize, Serialize};

/// A measured directory ranked by size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargestDirectory {
    pub path: String,

    pub size: f64,

    /// Percentage of the common root's size
    pub percentage: f64,
}

/// Largest measured directories, descending by size
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `graph` - Flow graph from `build_flow_graph`
/// * `top_n` - Number of directories to return
pub fn largest_directories(graph: &FlowGraph, top_n: usize) -> Vec<LargestDirectory> {
    debug!(
        "Selecting top {} of {} measured directories",
        top_n,
        graph.measured_count()
    );

    let total = graph.total_size();
    let mut measured: Vec<_> = graph.nodes.iter().filter(|n| n.is_measured).collect();
    measured.sort_by(|a, b| b.size.total_cmp(&a.size).then_with(|| a.path.cmp(&b.path)));

    measured
        .into_iter()
        .take(top_n)
        .map(|node| LargestDirectory {
            path: node.path.clone(),
            size: node.size,
            percentage: percentage_of(node.size, total),
        })
        .collect()
}

fn percentage_of(size: f64, total: f64) -> f64 {
    if total > 0.0 {
        (size / total) * 100.0
    } else {
        0.0
    }
}

/// Summary statistics for a flow graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeDistribution {
    /// Size of the common root
    pub total_size: f64,

    pub node_count: usize,
    pub measured_count: usize,
    pub synthesized_count: usize,

    /// Deepest level below the root
    pub max_depth: usize,

    pub mean_measured_size: f64,
    pub median_measured_size: f64,
}

/// Calculate size distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_size_distribution(graph: &FlowGraph) -> SizeDistribution {
    if graph.nodes.is_empty() {
        return SizeDistribution::default();
    }

    let mut sizes: Vec<f64> = graph
        .nodes
        .iter()
        .filter(|n| n.is_measured)
        .map(|n| n.size)
        .collect();
    sizes.sort_by(f64::total_cmp);

    let measured_total: f64 = sizes.iter().sum();
    let count = sizes.len();

    let mean = if count > 0 {
        measured_total / count as f64
    } else {
        0.0
    };
    let median = match count {
        0 => 0.0,
        n if n % 2 == 0 => (sizes[n / 2 - 1] + sizes[n / 2]) / 2.0,
        n => sizes[n / 2],
    };

    SizeDistribution {
        total_size: graph.total_size(),
        node_count: graph.nodes.len(),
        measured_count: count,
        synthesized_count: graph.synthesized_count(),
        max_depth: graph.max_depth(),
        mean_measured_size: mean,
        median_measured_size: median,
    }
}

impl SizeDistribution {
    /// Get human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Total: {} GB | Nodes: {} ({} measured, {} synthesized) | Depth: {} | Mean: {} GB | Median: {} GB",
            format_size(self.total_size),
            self.node_count,
            self.measured_count,
            self.synthesized_count,
            self.max_depth,
            format_size(self.mean_measured_size),
            format_size(self.median_measured_size)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::flow_graph::build_flow_graph;
    use crate::aggregator::record::PathRecord;

    fn graph(entries: &[(&str, f64)]) -> FlowGraph {
        let records: Vec<PathRecord> = entries
            .iter()
            .map(|(p, s)| PathRecord::parse(p, *s).unwrap())
            .collect();
        build_flow_graph(&records).unwrap()
    }

    #[test]
    fn test_largest_directories() {
        let g = graph(&[("/d/a", 10.0), ("/d/b", 30.0), ("/d/c", 60.0)]);
        let top = largest_directories(&g, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].path, "/d/c");
        assert_eq!(top[0].percentage, 60.0);
        assert_eq!(top[1].path, "/d/b");
    }

    #[test]
    fn test_size_distribution() {
        let g = graph(&[("/d/x/a", 85.0), ("/d/x/b", 5.0), ("/d/y", 5.0), ("/d/z", 5.0)]);
        let dist = calculate_size_distribution(&g);

        assert_eq!(dist.total_size, 100.0);
        assert_eq!(dist.measured_count, 4);
        assert_eq!(dist.synthesized_count, 2);
        assert_eq!(dist.max_depth, 2);
        assert_eq!(dist.mean_measured_size, 25.0);
        assert_eq!(dist.median_measured_size, 5.0);
        assert_eq!(
            dist.summary(),
            "Total: 100 GB | Nodes: 6 (4 measured, 2 synthesized) | Depth: 2 | Mean: 25 GB | Median: 5 GB"
        );
    }

    #[test]
    fn test_median_of_even_count() {
        let g = graph(&[("/d/a", 1.0), ("/d/b", 2.0), ("/d/c", 4.0), ("/d/e", 10.0)]);
        assert_eq!(calculate_size_distribution(&g).median_measured_size, 3.0);
    }

    #[test]
    fn test_distribution_empty() {
        let empty = FlowGraph {
            nodes: vec![],
            edges: vec![],
        };
        let dist = calculate_size_distribution(&empty);
        assert_eq!(dist.node_count, 0);
        assert_eq!(dist.total_size, 0.0);
    }
}
