use damply::commands::{execute_plot, validate_args, validate_profile_file, PlotArgs};
use damply::output::read_profile;
use damply::sankey::SankeyConfig;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const REPORT: &str = "\
abspath\tsize_GB\towner
/data/proj/a\t150\talice
/data/proj/b\t250\tbob
/data/other\t120\tcarol
/data/small\t3\tdave
";

fn write_report(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("audit.tsv");
    fs::write(&path, REPORT).unwrap();
    path
}

#[test]
fn test_plot_writes_svg_next_to_report() {
    let dir = tempdir().unwrap();
    let report = write_report(dir.path());

    let args = PlotArgs {
        report: report.clone(),
        ..Default::default()
    };
    assert!(validate_args(&args).is_ok());

    let svg_path = execute_plot(args).unwrap();
    assert_eq!(svg_path, dir.path().join("audit.svg"));

    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("proj"));
    assert!(!svg.contains("small"));
}

#[test]
fn test_plot_writes_profile() {
    let dir = tempdir().unwrap();
    let report = write_report(dir.path());
    let json_path = dir.path().join("out/profile.json");

    let args = PlotArgs {
        report,
        output_svg: Some(dir.path().join("out/plot.svg")),
        output_json: Some(json_path.clone()),
        sankey_config: SankeyConfig::new().with_title("Storage"),
        ..Default::default()
    };
    execute_plot(args).unwrap();

    let profile = read_profile(&json_path).unwrap();
    assert_eq!(profile.root, "/data");
    assert_eq!(profile.total_size, 520.0);
    assert_eq!(profile.measured_count, 3);
    assert_eq!(profile.synthesized_count, 2);
    assert_eq!(profile.edges.len(), profile.nodes.len() - 1);
    assert_eq!(profile.largest[0].path, "/data/proj/b");

    assert!(validate_profile_file(&json_path).is_ok());
}

#[test]
fn test_plot_threshold_removes_everything() {
    let dir = tempdir().unwrap();
    let report = write_report(dir.path());

    let args = PlotArgs {
        report,
        threshold_gb: 1000.0,
        ..Default::default()
    };

    let err = execute_plot(args).unwrap_err();
    assert!(format!("{:#}", err).contains("No path records supplied"));
}

#[test]
fn test_plot_rejects_report_without_size_column() {
    let dir = tempdir().unwrap();
    let report = dir.path().join("bad.tsv");
    fs::write(&report, "abspath\towner\n/data/a\talice\n").unwrap();

    let args = PlotArgs {
        report,
        ..Default::default()
    };

    assert!(execute_plot(args).is_err());
}

#[test]
fn test_validate_profile_rejects_dangling_edge() {
    let dir = tempdir().unwrap();
    let report = write_report(dir.path());
    let json_path = dir.path().join("profile.json");

    execute_plot(PlotArgs {
        report,
        output_json: Some(json_path.clone()),
        ..Default::default()
    })
    .unwrap();

    let mut profile = read_profile(&json_path).unwrap();
    profile.edges[0].target = 99;
    damply::output::write_profile(&profile, &json_path).unwrap();

    assert!(validate_profile_file(&json_path).is_err());
}

#[test]
fn test_validate_profile_rejects_inconsistent_aggregate() {
    let dir = tempdir().unwrap();
    let report = write_report(dir.path());
    let json_path = dir.path().join("profile.json");

    execute_plot(PlotArgs {
        report,
        output_json: Some(json_path.clone()),
        ..Default::default()
    })
    .unwrap();

    let mut profile = read_profile(&json_path).unwrap();
    let proj = profile
        .nodes
        .iter()
        .position(|n| n.path == "/data/proj")
        .unwrap();
    assert!(!profile.nodes[proj].is_measured);
    profile.nodes[proj].size = 1.0;
    for edge in profile.edges.iter_mut().filter(|e| e.target == proj) {
        edge.value = 1.0;
    }
    damply::output::write_profile(&profile, &json_path).unwrap();

    let err = validate_profile_file(&json_path).unwrap_err();
    assert!(err.to_string().contains("Aggregated size of /data"));
}

#[test]
fn test_validate_profile_rejects_skipped_level() {
    let dir = tempdir().unwrap();
    let report = write_report(dir.path());
    let json_path = dir.path().join("profile.json");

    execute_plot(PlotArgs {
        report,
        output_json: Some(json_path.clone()),
        ..Default::default()
    })
    .unwrap();

    let mut profile = read_profile(&json_path).unwrap();
    let leaf = profile
        .nodes
        .iter()
        .position(|n| n.path == "/data/proj/a")
        .unwrap();
    let edge = profile.edges.iter_mut().find(|e| e.target == leaf).unwrap();
    edge.source = 0;
    damply::output::write_profile(&profile, &json_path).unwrap();

    assert!(validate_profile_file(&json_path).is_err());
}
