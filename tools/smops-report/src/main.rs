//! SMOPS benchmark report.
//!
//! Reads the trial files recorded for each execution configuration, averages
//! them, and for every (operation, type) pair writes a load-time and an
//! operation-time comparison chart and prints the speed-ups over the
//! sequential baseline at the largest matrix dimension.

mod cli;
mod config;
mod report;
mod verbose;

use anyhow::{Result, bail};
use clap::Parser;

use config::ReportConfig;
use verbose::{dprintln, vprintln};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(cli.quiet, cli.verbose);

    let config = ReportConfig::load(cli.config.as_deref())?;
    if verbose::is_verbose() {
        config.print();
    }

    let outcome = report::run(&config, cli.keep_going)?;

    if let Some(ref path) = cli.save_summary {
        smops_perf::save_summary(&outcome.pairs, path)?;
        vprintln!("Summary saved to {}", path.display());
    }

    if !outcome.failed.is_empty() {
        let skipped: Vec<String> = outcome
            .failed
            .iter()
            .map(|(op, ty)| format!("{op} {ty}"))
            .collect();
        dprintln!("Skipped: {}", skipped.join(", "));
        bail!("{} pair(s) could not be reported", outcome.failed.len());
    }

    Ok(())
}
