//! Damply CLI
//!
//! Query and audit directories that follow the Data Management Plan (DMP)
//! standard, and plot storage usage from audit reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use damply::commands::{
    display_schema, display_version, execute_audit, execute_log, execute_plot, execute_size,
    execute_view, execute_whose, validate_args, validate_profile_file, PlotArgs,
};
use damply::sankey::SankeyConfig;
use damply::utils::config::{DEFAULT_FIG_HEIGHT, DEFAULT_FIG_WIDTH, DEFAULT_THRESHOLD_GB};

/// A tool to interact with systems implementing the Data Management Plan (DMP) standard.
#[derive(Parser, Debug)]
#[command(name = "damply")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Plot the results of a damply audit as a Sankey diagram
    Plot {
        /// Tab-separated audit report (needs abspath and size_GB columns)
        report: PathBuf,

        /// Only plot directories larger than this many GB
        #[arg(long, default_value_t = DEFAULT_THRESHOLD_GB)]
        threshold_gb: f64,

        /// Figure width in pixels
        #[arg(long, default_value_t = DEFAULT_FIG_WIDTH)]
        fig_width: usize,

        /// Figure height in pixels
        #[arg(long, default_value_t = DEFAULT_FIG_HEIGHT)]
        fig_height: usize,

        /// Output path for the SVG diagram (defaults to the report path with .svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for a JSON flow profile (optional)
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Diagram title
        #[arg(long)]
        title: Option<String>,

        /// Number of largest directories listed in the JSON profile
        #[arg(long, default_value = "10")]
        top_dirs: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Deepest level shown in the text summary
        #[arg(long, default_value = "3")]
        summary_depth: usize,
    },

    /// View the DMP metadata of a valid DMP directory
    View {
        /// DMP directory (defaults to the current directory)
        #[arg(default_value = ".")]
        directory: PathBuf,
    },

    /// Add a log entry to the metadata
    Log {
        /// Description of the change
        description: String,

        /// DMP directory or README file
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },

    /// Print the owner of the file or directory
    Whose {
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Audit owner, permissions and timestamps of a directory
    Audit {
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the total size of a DMP directory
    Size {
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate a flow profile JSON file
    Validate {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Plot {
            report,
            threshold_gb,
            fig_width,
            fig_height,
            output,
            json,
            title,
            top_dirs,
            summary,
            summary_depth,
        } => {
            let mut config = SankeyConfig::new().with_size(fig_width, fig_height);
            if let Some(title_str) = title {
                config = config.with_title(title_str);
            }

            let args = PlotArgs {
                report,
                threshold_gb,
                output_svg: output,
                output_json: json,
                sankey_config: config,
                top_dirs,
                print_summary: summary,
                summary_depth,
            };

            // Validate args first
            validate_args(&args)?;

            let svg_path = execute_plot(args)?;
            println!("The plot is saved to {}", svg_path.display());
        }

        Commands::View { directory } => {
            execute_view(&directory)?;
        }

        Commands::Log { description, path } => {
            execute_log(&path, &description)?;
        }

        Commands::Whose { path } => {
            execute_whose(&path)?;
        }

        Commands::Audit { path } => {
            execute_audit(&path)?;
        }

        Commands::Size { path } => {
            execute_size(&path)?;
        }

        Commands::Validate { file } => {
            validate_profile_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
