//! Input parsing and schema definitions.
//!
//! This module handles:
//! - Loading tab-separated audit reports
//! - Reading and writing DMP README metadata
//! - Defining the output profile schema

pub mod metadata;
pub mod report;
pub mod schema;

// Re-export main types
pub use metadata::{find_readme, parse_readme, DmpMetadata, ReadmeContents};
pub use report::{load_report, parse_report, Report};
pub use schema::{to_profile, FlowProfile};
