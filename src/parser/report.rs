//! Tab-separated audit report loader.
//!
//! Reports carry one row per directory with many columns (owner,
//! permissions, timestamps, README fields, sizes). Only `abspath` and
//! `size_GB` are needed to build a flow graph; everything else is ignored.

use crate::aggregator::{DirPath, PathRecord};
use crate::utils::config::MANDATORY_COLUMNS;
use crate::utils::error::ReportError;
use log::{debug, info};
use std::collections::HashSet;
use std::path::Path;

/// Records loaded from a report, plus row counts for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Directories above the size threshold
    pub records: Vec<PathRecord>,

    /// Data rows in the report (blank lines excluded)
    pub rows_read: usize,
}

impl Report {
    pub fn rows_kept(&self) -> usize {
        self.records.len()
    }
}

/// Load a report file, keeping directories larger than `threshold_gb`
///
/// **Public** - main entry point for report loading
///
/// # Errors
/// * `ReportError::Io` - the file cannot be read
/// * see `parse_report` for content errors
pub fn load_report(path: impl AsRef<Path>, threshold_gb: f64) -> Result<Report, ReportError> {
    let path = path.as_ref();
    debug!("Reading report from: {}", path.display());

    let content = std::fs::read_to_string(path)?;
    let report = parse_report(&content, threshold_gb)?;

    info!(
        "Loaded {} of {} directories above {} GB from {}",
        report.rows_kept(),
        report.rows_read,
        threshold_gb,
        path.display()
    );

    Ok(report)
}

/// Parse report text
///
/// **Public** - useful for tests and in-memory reports
///
/// Rows with an empty `size_GB` were not measured and are skipped.
/// The threshold is strict: a directory of exactly `threshold_gb` is
/// dropped.
///
/// # Errors
/// * `ReportError::MissingHeader` - no header row
/// * `ReportError::MissingColumns` - `abspath` or `size_GB` absent
/// * `ReportError::InvalidRow` - short row, bad size, or relative path
/// * `ReportError::DuplicatePath` - a kept directory appears twice
pub fn parse_report(content: &str, threshold_gb: f64) -> Result<Report, ReportError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(ReportError::MissingHeader)?;
    let columns = ColumnIndex::from_header(header)?;

    let mut records = Vec::new();
    let mut seen: HashSet<DirPath> = HashSet::new();
    let mut rows_read = 0;

    for (line_no, line) in lines {
        rows_read += 1;
        let fields: Vec<&str> = line.split('\t').map(clean_field).collect();

        let (Some(raw_path), Some(raw_size)) =
            (fields.get(columns.abspath), fields.get(columns.size_gb))
        else {
            return Err(ReportError::InvalidRow {
                line: line_no,
                reason: format!("expected at least {} fields, found {}", columns.width(), fields.len()),
            });
        };

        if raw_size.is_empty() {
            debug!("Skipping unmeasured directory at line {}", line_no);
            continue;
        }

        let size: f64 = raw_size.parse().map_err(|_| ReportError::InvalidRow {
            line: line_no,
            reason: format!("size_GB '{}' is not a number", raw_size),
        })?;

        if size.is_nan() || size <= threshold_gb {
            continue;
        }

        let record = PathRecord::parse(raw_path, size).map_err(|e| ReportError::InvalidRow {
            line: line_no,
            reason: e.to_string(),
        })?;

        if !seen.insert(record.path.clone()) {
            return Err(ReportError::DuplicatePath(record.path.to_string()));
        }
        records.push(record);
    }

    Ok(Report { records, rows_read })
}

/// Positions of the mandatory columns
struct ColumnIndex {
    abspath: usize,
    size_gb: usize,
}

impl ColumnIndex {
    fn from_header(header: &str) -> Result<Self, ReportError> {
        let names: Vec<&str> = header.split('\t').map(clean_field).collect();
        let position = |wanted: &str| names.iter().position(|name| *name == wanted);

        let missing: Vec<String> = MANDATORY_COLUMNS
            .iter()
            .filter(|col| position(col).is_none())
            .map(|col| col.to_string())
            .collect();

        match (position("abspath"), position("size_GB")) {
            (Some(abspath), Some(size_gb)) if missing.is_empty() => Ok(Self { abspath, size_gb }),
            _ => Err(ReportError::MissingColumns(missing)),
        }
    }

    fn width(&self) -> usize {
        self.abspath.max(self.size_gb) + 1
    }
}

/// Trim whitespace and surrounding double quotes
fn clean_field(field: &str) -> &str {
    let trimmed = field.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "owner\tabspath\tpermissions\tsize_GB";

    #[test]
    fn test_threshold_is_strict() {
        let content = format!(
            "{}\nalice\t/data/a\tdrwx\t100\nbob\t/data/b\tdrwx\t150.5\n",
            HEADER
        );
        let report = parse_report(&content, 100.0).unwrap();

        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_kept(), 1);
        assert_eq!(report.records[0].path.to_string(), "/data/b");
        assert_eq!(report.records[0].size, 150.5);
    }

    #[test]
    fn test_missing_columns() {
        let err = parse_report("owner\tabspath\n", 0.0).unwrap_err();
        match err {
            ReportError::MissingColumns(cols) => assert_eq!(cols, vec!["size_GB".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_report() {
        assert!(matches!(parse_report("\n\n", 0.0), Err(ReportError::MissingHeader)));
    }

    #[test]
    fn test_short_row() {
        let content = format!("{}\nalice\t/data/a\n", HEADER);
        let err = parse_report(&content, 0.0).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn test_bad_size() {
        let content = format!("{}\nalice\t/data/a\tdrwx\tlots\n", HEADER);
        assert!(matches!(
            parse_report(&content, 0.0),
            Err(ReportError::InvalidRow { .. })
        ));
    }

    #[test]
    fn test_relative_path_rejected() {
        let content = format!("{}\nalice\tdata/a\tdrwx\t5\n", HEADER);
        assert!(matches!(
            parse_report(&content, 0.0),
            Err(ReportError::InvalidRow { .. })
        ));
    }

    #[test]
    fn test_empty_size_skipped() {
        let content = format!("{}\nalice\t/data/a\tdrwx\t\n", HEADER);
        let report = parse_report(&content, 0.0).unwrap();
        assert_eq!(report.rows_read, 1);
        assert!(report.records.is_empty());
    }

    #[test]
    fn test_duplicate_path() {
        let content = format!(
            "{}\nalice\t/data/a\tdrwx\t5\nbob\t\"/data/a/\"\tdrwx\t6\n",
            HEADER
        );
        assert!(matches!(
            parse_report(&content, 0.0),
            Err(ReportError::DuplicatePath(p)) if p == "/data/a"
        ));
    }
}
