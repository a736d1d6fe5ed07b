//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Directories at or below this size (in GB) are dropped from reports
pub const DEFAULT_THRESHOLD_GB: f64 = 100.0;

// Figure dimensions in pixels
pub const DEFAULT_FIG_WIDTH: usize = 3340;
pub const DEFAULT_FIG_HEIGHT: usize = 1440;

// Sankey node geometry
pub const NODE_PADDING: f64 = 15.0;
pub const NODE_THICKNESS: f64 = 20.0;

/// Columns every audit report must carry
pub const MANDATORY_COLUMNS: &[&str] = &["abspath", "size_GB"];

/// Fields every DMP README must define
pub const MANDATORY_FIELDS: &[&str] = &["OWNER", "DATE", "DESC"];

/// Field lines longer than this are wrapped on write
pub const README_LINE_WIDTH: usize = 80;

/// Timestamp format used for README log entries
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Placeholder when an owner cannot be resolved
pub const UNKNOWN_OWNER: &str = "Unknown";
