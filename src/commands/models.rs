use crate::sankey::SankeyConfig;
use crate::utils::config::DEFAULT_THRESHOLD_GB;
use std::path::{Path, PathBuf};

/// Arguments for the plot command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct PlotArgs {
    /// Tab-separated audit report
    pub report: PathBuf,

    /// Keep directories strictly larger than this (GB)
    pub threshold_gb: f64,

    /// Output path for the SVG diagram (defaults next to the report)
    pub output_svg: Option<PathBuf>,

    /// Output path for the JSON flow profile (optional)
    pub output_json: Option<PathBuf>,

    /// Diagram title and dimensions
    pub sankey_config: SankeyConfig,

    /// Number of largest directories to list in the profile
    pub top_dirs: usize,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Deepest level shown in the text summary
    pub summary_depth: usize,
}

impl Default for PlotArgs {
    fn default() -> Self {
        Self {
            report: PathBuf::new(),
            threshold_gb: DEFAULT_THRESHOLD_GB,
            output_svg: None,
            output_json: None,
            sankey_config: SankeyConfig::default(),
            top_dirs: 10,
            print_summary: false,
            summary_depth: 3,
        }
    }
}

impl PlotArgs {
    /// SVG destination: explicit path, or the report path with `.svg`
    pub fn svg_path(&self) -> PathBuf {
        self.output_svg
            .clone()
            .unwrap_or_else(|| default_svg_path(&self.report))
    }
}

fn default_svg_path(report: &Path) -> PathBuf {
    report.with_extension("svg")
}
