//! Command-line interface definitions for smops-report.

use clap::Parser;
use std::path::PathBuf;

/// Summarise SMOPS benchmark results and render comparison charts.
#[derive(Parser)]
#[command(name = "smops-report", version, about)]
pub struct Cli {
    /// Report configuration file (default: report.toml if present).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Print only the summary and errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every file read and chart written, with timings.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Report and skip pairs with missing data instead of stopping.
    #[arg(long)]
    pub keep_going: bool,

    /// Also write every pair's speed-ups to this JSON file.
    #[arg(long)]
    pub save_summary: Option<PathBuf>,
}
