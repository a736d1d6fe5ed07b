//! Sankey diagram rendering.
//!
//! This module converts flow graphs into SVG Sankey diagrams, where each
//! band's width encodes how much of a parent directory's storage lives in
//! each child.

pub mod generator;

// Re-export main types
pub use generator::{
    compute_layout,
    generate_sankey,
    generate_text_summary,
    LinkBand,
    NodeRect,
    SankeyConfig,
    SankeyLayout,
};
