//! Damply
//!
//! Tools for administrators of systems implementing the Data Management
//! Plan (DMP) standard: inspect README metadata, audit directory owners
//! and permissions, and render storage usage as Sankey flow diagrams.
//!
//! This crate provides the core implementation for the `damply` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! damply plot audit.tsv --threshold-gb 50 --summary
//! damply --help
//! ```
//!
//! The heart of the crate is [`aggregator::build_flow_graph`], which turns
//! a flat list of measured directories into an ordered node list with
//! parent -> child edges.

pub mod aggregator;
pub mod audit;
pub mod commands;
pub mod output;
pub mod parser;
pub mod sankey;
pub mod utils;
