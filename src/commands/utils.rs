use crate::aggregator::{format_size, FlowGraph};
use crate::output::read_profile;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a flow profile JSON file
///
/// Besides parsing, checks that edges reference existing nodes, that every
/// non-root node has exactly one parent one level above it, and that
/// aggregated sizes match their children.
pub fn validate_profile_file(file_path: &Path) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(file_path)?;

    let node_count = profile.nodes.len();
    if let Some(edge) = profile
        .edges
        .iter()
        .find(|e| e.source >= node_count || e.target >= node_count)
    {
        anyhow::bail!(
            "Edge {} -> {} references a missing node ({} nodes)",
            edge.source,
            edge.target,
            node_count
        );
    }
    if node_count > 0 && profile.edges.len() != node_count - 1 {
        anyhow::bail!(
            "Expected {} edges for {} nodes, found {}",
            node_count - 1,
            node_count,
            profile.edges.len()
        );
    }

    check_hierarchy(&profile.to_graph())?;

    println!("✓ Valid profile JSON");
    println!("  Version: {}", profile.version);
    println!("  Source: {}", profile.source);
    println!("  Root: {}", profile.root);
    println!("  Total Size: {} GB", format_size(profile.total_size));
    println!(
        "  Directories: {} ({} measured, {} aggregated)",
        node_count, profile.measured_count, profile.synthesized_count
    );
    println!("  Flows: {}", profile.edges.len());

    Ok(())
}

fn check_hierarchy(graph: &FlowGraph) -> Result<()> {
    let Some(root) = graph.root() else {
        return Ok(());
    };
    if root.depth != 0 {
        anyhow::bail!("First node {} is not the root (depth {})", root.path, root.depth);
    }

    let mut parents = vec![0usize; graph.nodes.len()];
    for edge in &graph.edges {
        let (source, target) = (&graph.nodes[edge.source], &graph.nodes[edge.target]);
        if target.depth != source.depth + 1 {
            anyhow::bail!("Edge {} -> {} skips a level", source.path, target.path);
        }
        if edge.value != target.size {
            anyhow::bail!(
                "Edge into {} carries {} but the directory holds {}",
                target.path,
                edge.value,
                target.size
            );
        }
        parents[edge.target] += 1;
    }

    if parents[0] != 0 {
        anyhow::bail!("Root {} has an incoming edge", root.path);
    }
    if let Some(orphan) = (1..graph.nodes.len()).find(|&i| parents[i] != 1) {
        anyhow::bail!(
            "{} has {} parents, expected 1",
            graph.nodes[orphan].path,
            parents[orphan]
        );
    }

    for (node, children) in graph.nodes.iter().zip(graph.children_map()) {
        if node.is_measured || children.is_empty() {
            continue;
        }
        let sum: f64 = children.iter().map(|&c| graph.nodes[c].size).sum();
        if (node.size - sum).abs() > 1e-9 * sum.abs().max(1.0) {
            anyhow::bail!(
                "Aggregated size of {} is {} but its children sum to {}",
                node.path,
                node.size,
                sum
            );
        }
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Damply Flow Profile Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  source: string             - Report the profile was built from");
        println!("  threshold_gb: number       - Size threshold applied to the report");
        println!("  root: string               - Common root directory");
        println!("  total_size: number         - Size of the root (GB)");
        println!("  measured_count: number     - Directories present in the report");
        println!("  synthesized_count: number  - Ancestors aggregated from children");
        println!("  largest: array             - Largest measured directories");
        println!("    path, size, percentage");
        println!("  nodes: array               - Ordered directories, root first");
        println!("    path, label, size, is_measured, depth");
        println!("  edges: array               - Parent -> child flows");
        println!("    source, target, value");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("damply v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("A tool to interact with systems implementing the Data Management Plan (DMP) standard.");
}
