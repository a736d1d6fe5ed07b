//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while building the directory flow graph
///
/// Every variant is fatal for the current invocation: the computation is
/// pure, so retrying with the same input cannot succeed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HierarchyError {
    #[error("No path records supplied")]
    EmptyInput,

    #[error("Directory {path} cannot be connected to the common root")]
    IncompleteHierarchy { path: String },

    #[error("Directory {path} has a negative or non-finite size: {size}")]
    NegativeSize { path: String, size: f64 },

    #[error("Directory {path} was supplied more than once")]
    DuplicatePath { path: String },

    #[error("Invalid directory path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading a tabular audit report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report is empty (no header row)")]
    MissingHeader,

    #[error("The report must contain the following columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },

    #[error("Directory {0} appears more than once in the report")]
    DuplicatePath(String),
}

/// Errors that can occur while reading or writing README metadata
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No README file found in {0}")]
    NoReadme(String),

    #[error("The file is not a README file: {0}")]
    NotReadme(String),

    #[error("The following fields are missing: {} in {readme}", .missing.join(", "))]
    MissingFields { missing: Vec<String>, readme: String },

    #[error("{path} is not writable: {permissions}")]
    NotWritable { path: String, permissions: String },
}

/// Errors that can occur while collecting directory audit information
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to stat {path}: {source}")]
    Stat {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during Sankey diagram rendering
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Flow graph has no nodes")]
    EmptyGraph,

    #[error("Flow graph has zero total size, nothing to draw")]
    ZeroTotal,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
