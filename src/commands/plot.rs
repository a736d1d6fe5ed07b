//! Plot command implementation.
//!
//! The plot command:
//! 1. Loads the audit report
//! 2. Builds the directory flow graph
//! 3. Calculates size metrics
//! 4. Renders the Sankey diagram
//! 5. Writes output files

use super::models::PlotArgs;
use crate::aggregator::{build_flow_graph, calculate_size_distribution};
use crate::output::{write_profile, write_svg};
use crate::parser::{load_report, to_profile};
use crate::sankey::{generate_sankey, generate_text_summary};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Execute the plot command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Path of the written SVG diagram
///
/// # Errors
/// * Report read or format errors
/// * Inconsistent hierarchy (empty after filtering, negative sizes, ...)
/// * File write errors
pub fn execute_plot(args: PlotArgs) -> Result<PathBuf> {
    let start_time = Instant::now();

    info!("Plotting report: {}", args.report.display());

    // Step 1: Load report
    info!("Step 1/5: Loading report (threshold {} GB)...", args.threshold_gb);
    let report = load_report(&args.report, args.threshold_gb)
        .with_context(|| format!("Failed to load report {}", args.report.display()))?;

    // Step 2: Build flow graph
    info!("Step 2/5: Building flow graph from {} directories...", report.rows_kept());
    let graph = build_flow_graph(&report.records).with_context(|| {
        format!(
            "Failed to build flow graph ({} of {} directories above {} GB)",
            report.rows_kept(),
            report.rows_read,
            args.threshold_gb
        )
    })?;

    // Step 3: Metrics
    info!("Step 3/5: Calculating size distribution...");
    let distribution = calculate_size_distribution(&graph);
    info!("Size distribution: {}", distribution.summary());

    // Step 4: Render
    info!("Step 4/5: Rendering Sankey diagram...");
    let svg = generate_sankey(&graph, Some(&args.sankey_config))
        .context("Failed to render Sankey diagram")?;

    // Step 5: Write outputs
    info!("Step 5/5: Writing output files...");
    let svg_path = args.svg_path();
    write_svg(&svg, &svg_path).context("Failed to write Sankey SVG")?;
    info!("✓ Diagram written to: {}", svg_path.display());

    if let Some(json_path) = &args.output_json {
        let profile = to_profile(
            &graph,
            &args.report.display().to_string(),
            args.threshold_gb,
            args.top_dirs,
        );
        write_profile(&profile, json_path).context("Failed to write flow profile JSON")?;
        info!("✓ Profile written to: {}", json_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(84));
        println!("STORAGE SUMMARY");
        println!("{}", "=".repeat(84));
        println!("Report:      {}", args.report.display());
        println!("Threshold:   {} GB", args.threshold_gb);
        println!("Directories: {} of {} rows", report.rows_kept(), report.rows_read);
        println!("{}", distribution.summary());
        println!("\n{}", generate_text_summary(&graph, args.summary_depth));
        println!("{}", "=".repeat(84));
    }

    debug!("Plot finished for {} nodes", graph.nodes.len());
    info!("Plot completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(svg_path)
}

/// Validate plot arguments
///
/// **Public** - can be called before execute_plot for early validation
pub fn validate_args(args: &PlotArgs) -> Result<()> {
    if args.report.as_os_str().is_empty() {
        anyhow::bail!("Report path cannot be empty");
    }

    if !args.report.is_file() {
        anyhow::bail!("Report not found: {}", args.report.display());
    }

    if !args.threshold_gb.is_finite() || args.threshold_gb < 0.0 {
        anyhow::bail!("threshold_gb must be a non-negative number");
    }

    let config = &args.sankey_config;
    if config.width == 0 || config.height == 0 {
        anyhow::bail!("Figure dimensions must be greater than 0");
    }

    if config.width > 20_000 || config.height > 20_000 {
        anyhow::bail!("Figure dimensions are too large (max 20000 px)");
    }

    if args.top_dirs == 0 {
        anyhow::bail!("top_dirs must be greater than 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sankey::SankeyConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn report_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "abspath\tsize_GB").unwrap();
        writeln!(file, "/data/proj/a\t150").unwrap();
        file
    }

    #[test]
    fn test_validate_args_valid() {
        let report = report_file();
        let args = PlotArgs {
            report: report.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_missing_report() {
        let args = PlotArgs {
            report: PathBuf::from("/definitely/not/here.tsv"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_report() {
        assert!(validate_args(&PlotArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_negative_threshold() {
        let report = report_file();
        let args = PlotArgs {
            report: report.path().to_path_buf(),
            threshold_gb: -1.0,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_width() {
        let report = report_file();
        let args = PlotArgs {
            report: report.path().to_path_buf(),
            sankey_config: SankeyConfig::new().with_size(0, 100),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_dirs_zero() {
        let report = report_file();
        let args = PlotArgs {
            report: report.path().to_path_buf(),
            top_dirs: 0,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }
}
