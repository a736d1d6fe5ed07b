//! SVG Sankey diagram generation.
//!
//! Directories are laid out in columns by depth below the common root.
//! Node height is proportional to size, and each parent -> child flow is
//! drawn as a band whose width equals the child's size.

use crate::aggregator::{format_size, FlowGraph};
use crate::utils::config::{DEFAULT_FIG_HEIGHT, DEFAULT_FIG_WIDTH, NODE_PADDING, NODE_THICKNESS};
use crate::utils::error::RenderError;
use log::{debug, info};

const TITLE_MARGIN: f64 = 50.0;
const SIDE_MARGIN: f64 = 20.0;
const LABEL_GAP: f64 = 6.0;

const MEASURED_COLOR: &str = "rgb(0, 0, 255)";
const SYNTHESIZED_COLOR: &str = "rgb(100, 149, 237)";
const LINK_COLOR: &str = "rgba(0, 0, 0, 0.2)";

/// Sankey diagram configuration
#[derive(Debug, Clone)]
pub struct SankeyConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,

    /// Vertical gap between nodes in a column
    pub node_padding: f64,

    /// Node rectangle width
    pub node_thickness: f64,
}

impl Default for SankeyConfig {
    fn default() -> Self {
        Self {
            title: "Storage Usage".to_string(),
            width: DEFAULT_FIG_WIDTH,
            height: DEFAULT_FIG_HEIGHT,
            node_padding: NODE_PADDING,
            node_thickness: NODE_THICKNESS,
        }
    }
}

impl SankeyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Position of one node on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One band between two nodes
#[derive(Debug, Clone, PartialEq)]
pub struct LinkBand {
    pub source: usize,
    pub target: usize,

    /// Top of the band at the source node's right edge
    pub source_y: f64,

    /// Top of the band at the target node's left edge
    pub target_y: f64,

    pub thickness: f64,
}

/// Computed geometry, indexed like the graph's nodes and edges
#[derive(Debug, Clone)]
pub struct SankeyLayout {
    pub nodes: Vec<NodeRect>,
    pub links: Vec<LinkBand>,

    /// Pixels per size unit
    pub scale: f64,
}

/// Compute node and link geometry
///
/// **Public** - exposed for tests and alternative renderers
///
/// # Errors
/// * `RenderError::EmptyGraph` - no nodes
/// * `RenderError::ZeroTotal` - every node has size zero
pub fn compute_layout(graph: &FlowGraph, config: &SankeyConfig) -> Result<SankeyLayout, RenderError> {
    if graph.nodes.is_empty() {
        return Err(RenderError::EmptyGraph);
    }
    if graph.nodes.iter().all(|n| n.size <= 0.0) {
        return Err(RenderError::ZeroTotal);
    }

    let columns = graph.max_depth() + 1;
    let plot_top = TITLE_MARGIN;
    let plot_height = (config.height as f64 - TITLE_MARGIN - SIDE_MARGIN).max(1.0);
    let plot_width = (config.width as f64 - 2.0 * SIDE_MARGIN - config.node_thickness).max(0.0);
    let column_step = if columns > 1 {
        plot_width / (columns - 1) as f64
    } else {
        0.0
    };

    // Node positions per column, in graph order
    let mut by_column: Vec<Vec<usize>> = vec![Vec::new(); columns];
    for (i, node) in graph.nodes.iter().enumerate() {
        by_column[node.depth].push(i);
    }

    // Padding shrinks for crowded columns so nodes keep most of the height
    let paddings: Vec<f64> = by_column
        .iter()
        .map(|col| match col.len() {
            0 | 1 => 0.0,
            n => config.node_padding.min(plot_height * 0.2 / (n - 1) as f64),
        })
        .collect();

    let scale = by_column
        .iter()
        .zip(&paddings)
        .filter_map(|(col, padding)| {
            let total: f64 = col.iter().map(|&i| graph.nodes[i].size).sum();
            let available = plot_height - padding * col.len().saturating_sub(1) as f64;
            (total > 0.0).then(|| available / total)
        })
        .fold(f64::INFINITY, f64::min);

    let mut rects = vec![
        NodeRect {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0
        };
        graph.nodes.len()
    ];

    for (column, (positions, padding)) in by_column.iter().zip(&paddings).enumerate() {
        let used: f64 = positions.iter().map(|&i| graph.nodes[i].size * scale).sum::<f64>()
            + padding * positions.len().saturating_sub(1) as f64;
        let mut y = plot_top + (plot_height - used).max(0.0) / 2.0;
        let x = SIDE_MARGIN + column as f64 * column_step;

        for &i in positions {
            let height = graph.nodes[i].size * scale;
            rects[i] = NodeRect {
                x,
                y,
                width: config.node_thickness,
                height,
            };
            y += height + padding;
        }
    }

    // Outgoing bands stack down the source in edge (child) order
    let mut out_offset = vec![0.0; graph.nodes.len()];
    let links = graph
        .edges
        .iter()
        .map(|edge| {
            let thickness = edge.value * scale;
            let band = LinkBand {
                source: edge.source,
                target: edge.target,
                source_y: rects[edge.source].y + out_offset[edge.source],
                target_y: rects[edge.target].y,
                thickness,
            };
            out_offset[edge.source] += thickness;
            band
        })
        .collect();

    debug!("Sankey layout: {} columns, scale {:.4} px/GB", columns, scale);

    Ok(SankeyLayout {
        nodes: rects,
        links,
        scale,
    })
}

/// Generate an SVG Sankey diagram from a flow graph
///
/// **Public** - main entry point for rendering
pub fn generate_sankey(graph: &FlowGraph, config: Option<&SankeyConfig>) -> Result<String, RenderError> {
    let config = config.cloned().unwrap_or_default();
    info!("Generating Sankey diagram with {} nodes", graph.nodes.len());

    let layout = compute_layout(graph, &config)?;
    let last_column = graph.max_depth();

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    ));
    svg.push_str(
        r#"<style>.node:hover { stroke: black; stroke-width: 1; } .link:hover { fill-opacity: 0.5; } text { font: 20px sans-serif; fill: black; }</style>"#,
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="30" text-anchor="middle" font-weight="bold">{}</text>"#,
        config.width / 2,
        escape_xml(&config.title)
    ));

    // Links first so nodes draw on top
    for band in &layout.links {
        let x0 = layout.nodes[band.source].x + layout.nodes[band.source].width;
        let x1 = layout.nodes[band.target].x;
        let xm = (x0 + x1) / 2.0;
        let (y0, y1, t) = (band.source_y, band.target_y, band.thickness);
        let target = &graph.nodes[band.target];

        svg.push_str(&format!(
            r#"<path class="link" d="M{x0:.2},{y0:.2} C{xm:.2},{y0:.2} {xm:.2},{y1:.2} {x1:.2},{y1:.2} L{x1:.2},{y1b:.2} C{xm:.2},{y1b:.2} {xm:.2},{y0b:.2} {x0:.2},{y0b:.2} Z" fill="{color}"><title>{src} → {dst}: {size} GB</title></path>"#,
            y1b = y1 + t,
            y0b = y0 + t,
            color = LINK_COLOR,
            src = escape_xml(&graph.nodes[band.source].path),
            dst = escape_xml(&target.path),
            size = format_size(target.size),
        ));
    }

    for (i, (node, rect)) in graph.nodes.iter().zip(&layout.nodes).enumerate() {
        let color = if node.is_measured {
            MEASURED_COLOR
        } else {
            SYNTHESIZED_COLOR
        };
        let kind = if node.is_measured { "" } else { " (aggregated)" };

        svg.push_str(&format!(
            r#"<rect class="node" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="black" stroke-width="0.5"><title>{}: {} GB{}</title></rect>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            color,
            escape_xml(&node.path),
            format_size(node.size),
            kind
        ));

        // Labels sit right of the node, or left of it in the last column
        let (label_x, anchor) = if node.depth == last_column && last_column > 0 {
            (rect.x - LABEL_GAP, "end")
        } else {
            (rect.x + rect.width + LABEL_GAP, "start")
        };
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="{}" dominant-baseline="middle" pointer-events="none">{}</text>"#,
            label_x,
            rect.y + rect.height / 2.0,
            anchor,
            escape_xml(&graph.display_label(i))
        ));
    }

    svg.push_str("</svg>");

    info!("Sankey diagram generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Indented tree table of the flow graph, root first
///
/// Rows below `max_depth` are omitted. Aggregated directories are marked
/// with `*`.
pub fn generate_text_summary(graph: &FlowGraph, max_depth: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  STORAGE FLOW".to_string());
    lines.push(format!("  ┏{}┳{}┳{}┓", "━".repeat(52), "━".repeat(14), "━".repeat(9)));
    lines.push(format!("  ┃ {:<50} ┃ {:^12} ┃ {:^7} ┃", "Directory", "SIZE (GB)", "%"));
    lines.push(format!("  ┣{}╋{}╋{}┫", "━".repeat(52), "━".repeat(14), "━".repeat(9)));

    if !graph.nodes.is_empty() {
        let total = graph.total_size();
        let children = graph.children_map();
        let mut stack = vec![0usize];

        while let Some(position) = stack.pop() {
            let node = &graph.nodes[position];
            if node.depth > max_depth {
                continue;
            }

            let name = if position == 0 {
                node.path.clone()
            } else {
                format!("{}└─ {}", "  ".repeat(node.depth - 1), node.label)
            };
            let marker = if node.is_measured { "" } else { "*" };
            let display = truncate(&format!("{}{}", name, marker), 50);
            let percentage = if total > 0.0 {
                node.size / total * 100.0
            } else {
                0.0
            };

            lines.push(format!(
                "  ┃ {:<50} ┃ {:>12} ┃ {:>6.1}% ┃",
                display,
                format_size(node.size),
                percentage
            ));

            stack.extend(children[position].iter().rev());
        }
    }

    lines.push(format!("  ┗{}┻{}┻{}┛", "━".repeat(52), "━".repeat(14), "━".repeat(9)));
    lines.push("  * aggregated from subdirectories".to_string());

    lines.join("\n")
}

fn truncate(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let tail: String = text.chars().skip(count - (max_chars - 3)).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{build_flow_graph, PathRecord};

    fn sample_graph() -> FlowGraph {
        let records = vec![
            PathRecord::parse("/data/proj/a", 10.0).unwrap(),
            PathRecord::parse("/data/proj/b", 20.0).unwrap(),
            PathRecord::parse("/data/other", 5.0).unwrap(),
        ];
        build_flow_graph(&records).unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "...hijkl");
    }

    #[test]
    fn test_layout_heights_proportional() {
        let graph = sample_graph();
        let layout = compute_layout(&graph, &SankeyConfig::new()).unwrap();

        // nodes: /data, /data/other, /data/proj, /data/proj/a, /data/proj/b
        let a = &layout.nodes[3];
        let b = &layout.nodes[4];
        assert!((b.height - 2.0 * a.height).abs() < 1e-6);
        assert!(layout.nodes[0].x < layout.nodes[1].x);
        assert_eq!(layout.nodes[1].x, layout.nodes[2].x);
    }

    #[test]
    fn test_outgoing_bands_stack() {
        let graph = sample_graph();
        let layout = compute_layout(&graph, &SankeyConfig::new()).unwrap();

        let from_root: Vec<&LinkBand> = layout.links.iter().filter(|l| l.source == 0).collect();
        assert_eq!(from_root.len(), 2);
        let first = from_root[0];
        assert!((from_root[1].source_y - (first.source_y + first.thickness)).abs() < 1e-6);
    }

    #[test]
    fn test_empty_graph() {
        let graph = FlowGraph {
            nodes: vec![],
            edges: vec![],
        };
        assert!(matches!(generate_sankey(&graph, None), Err(RenderError::EmptyGraph)));
    }

    #[test]
    fn test_zero_total() {
        let records = vec![PathRecord::parse("/a", 0.0).unwrap()];
        let graph = build_flow_graph(&records).unwrap();
        assert!(matches!(generate_sankey(&graph, None), Err(RenderError::ZeroTotal)));
    }

    #[test]
    fn test_text_summary_tree_order() {
        let summary = generate_text_summary(&sample_graph(), 10);
        let rows: Vec<String> = summary
            .lines()
            .filter(|line| line.starts_with("  ┃ ") && !line.contains("Directory"))
            .map(|line| line.split('┃').nth(1).unwrap().trim_end()[1..].to_string())
            .collect();

        assert_eq!(
            rows,
            vec!["/data*", "└─ other", "└─ proj*", "  └─ a", "  └─ b"]
        );
    }

    #[test]
    fn test_text_summary_depth_limit() {
        let summary = generate_text_summary(&sample_graph(), 1);
        assert!(summary.contains("proj*"));
        assert!(!summary.contains("└─ a"));
    }
}
