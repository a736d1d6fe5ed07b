use damply::commands::execute_log;
use damply::parser::{load_report, DmpMetadata};
use damply::utils::error::{MetadataError, ReportError};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::{tempdir, NamedTempFile};

const README: &str = "\
#OWNER: Jane Doe

#DATE: 2024-05-01

#DESC: Raw sequencing output for the lymphoma cohort,
copied from the sequencing core

Files are organised by run date.

2024-05-01 10:30: Created directory.
";

#[test]
fn test_load_report_from_file() {
    let file = NamedTempFile::new().unwrap();
    fs::write(
        file.path(),
        "\"abspath\"\t\"size_GB\"\n\"/data/a\"\t\"120.5\"\n/data/b\t80\n/data/c\t\n",
    )
    .unwrap();

    let report = load_report(file.path(), 100.0).unwrap();
    assert_eq!(report.rows_read, 3);
    assert_eq!(report.rows_kept(), 1);
    assert_eq!(report.records[0].path.to_string(), "/data/a");
    assert_eq!(report.records[0].size, 120.5);
}

#[test]
fn test_load_report_missing_file() {
    let result = load_report("/no/such/report.tsv", 0.0);
    assert!(matches!(result, Err(ReportError::Io(_))));
}

#[test]
fn test_metadata_from_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README.md"), README).unwrap();

    let metadata = DmpMetadata::from_path(dir.path()).unwrap();
    assert_eq!(metadata.field("OWNER"), Some("Jane Doe"));
    assert_eq!(
        metadata.field("DESC"),
        Some("Raw sequencing output for the lymphoma cohort, copied from the sequencing core")
    );
    assert_eq!(metadata.content, "Files are organised by run date.");
    assert_eq!(metadata.logs, vec!["2024-05-01 10:30: Created directory.".to_string()]);
    assert!(metadata.check_fields().is_ok());
}

#[test]
fn test_metadata_missing_readme() {
    let dir = tempdir().unwrap();
    let result = DmpMetadata::from_path(dir.path());
    assert!(matches!(result, Err(MetadataError::NoReadme(_))));
}

#[test]
fn test_metadata_missing_fields() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README"), "#OWNER: Jane Doe\n").unwrap();

    let metadata = DmpMetadata::from_path(dir.path()).unwrap();
    match metadata.check_fields() {
        Err(MetadataError::MissingFields { missing, .. }) => {
            assert_eq!(missing, vec!["DATE".to_string(), "DESC".to_string()]);
        }
        other => panic!("expected missing fields, got {:?}", other),
    }
}

#[test]
fn test_log_command_appends_entry() {
    let dir = tempdir().unwrap();
    let readme = dir.path().join("README.md");
    fs::write(&readme, README).unwrap();

    execute_log(dir.path(), "Moved run 12 to tape").unwrap();

    let reloaded = DmpMetadata::from_path(&readme).unwrap();
    assert_eq!(reloaded.logs.len(), 2);
    assert!(reloaded.logs[1].ends_with(": Moved run 12 to tape"));
    assert_eq!(reloaded.field("OWNER"), Some("Jane Doe"));
    assert_eq!(reloaded.content, "Files are organised by run date.");
}
