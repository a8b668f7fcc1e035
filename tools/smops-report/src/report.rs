//! The report pipeline: for every (operation, type) pair, average the trial
//! files, render both comparison charts and print the speed-up summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use smops_perf::{
    ElementType, Metric, Operation, PairSpeedUps, build_result_matrix, print_pair_summary,
    render_chart_png,
};

use crate::config::ReportConfig;
use crate::verbose::{Timer, dprintln, vprintln};

/// What a report run produced.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Speed-ups of every pair that was reported, in reporting order.
    pub pairs: Vec<PairSpeedUps>,
    /// Pairs skipped because of errors (only with `keep_going`).
    pub failed: Vec<(Operation, ElementType)>,
}

/// Run the pipeline over every configured pair.
///
/// Stops at the first failing pair unless `keep_going` is set, in which case
/// the failure is logged and the pair skipped.
pub fn run(config: &ReportConfig, keep_going: bool) -> Result<Outcome> {
    let mut outcome = Outcome::default();

    for &operation in &config.layout.operations {
        for &ty in &config.layout.types {
            match report_pair(config, operation, ty) {
                Ok(pair) => {
                    print_pair_summary(&pair);
                    outcome.pairs.push(pair);
                }
                Err(e) if keep_going => {
                    dprintln!("Skipping {operation} {ty}: {e:#}");
                    outcome.failed.push((operation, ty));
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(outcome)
}

/// Aggregate one pair and write both of its charts.
fn report_pair(config: &ReportConfig, operation: Operation, ty: ElementType) -> Result<PairSpeedUps> {
    let _t = Timer::start(format!("{operation} {ty}"));
    let layout = &config.layout;

    let matrix = build_result_matrix(layout, operation, ty)
        .with_context(|| format!("aggregating {operation} {ty}"))?;
    vprintln!(
        "Averaged {} trial files for {operation} {ty}",
        layout.configurations.len() * layout.dimensions.len()
    );

    let mut charts = Vec::with_capacity(2);
    for metric in [Metric::Load, Metric::Operation] {
        let png = render_chart_png(&matrix, layout, operation, ty, metric)
            .with_context(|| format!("rendering {} chart for {operation} {ty}", metric.name()))?;
        charts.push((config.chart_path(operation, ty, metric), png));
    }
    write_charts(&charts)?;

    let pair = PairSpeedUps::compute(layout, &matrix, operation, ty)?;
    Ok(pair)
}

/// Write every chart of one pair, or none of them.
///
/// Each chart is staged next to its destination and only renamed into place
/// once all of them were written.
fn write_charts(charts: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    let mut staged: Vec<PathBuf> = Vec::with_capacity(charts.len());
    for (path, png) in charts {
        let part = path.with_extension("png.part");
        if let Err(e) = std::fs::write(&part, png) {
            for p in &staged {
                let _ = std::fs::remove_file(p);
            }
            return Err(e).with_context(|| format!("writing {}", path.display()));
        }
        staged.push(part);
    }

    for ((path, _), part) in charts.iter().zip(&staged) {
        std::fs::rename(part, path).with_context(|| format!("writing {}", path.display()))?;
        vprintln!("  wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charts_are_written_together() {
        let dir = tempfile::tempdir().unwrap();
        let load = dir.path().join("mmfloat-load.png");
        let op = dir.path().join("mmfloat-op.png");
        write_charts(&[(load.clone(), b"load".to_vec()), (op.clone(), b"op".to_vec())]).unwrap();
        assert_eq!(std::fs::read(&load).unwrap(), b"load");
        assert_eq!(std::fs::read(&op).unwrap(), b"op");
    }

    #[test]
    fn failed_write_leaves_no_chart() {
        let dir = tempfile::tempdir().unwrap();
        let load_dir = dir.path().join("fileload");
        std::fs::create_dir(&load_dir).unwrap();
        let load = load_dir.join("mmfloat.png");
        let op = dir.path().join("operation").join("mmfloat.png");

        assert!(write_charts(&[(load, b"load".to_vec()), (op, b"op".to_vec())]).is_err());
        assert_eq!(std::fs::read_dir(&load_dir).unwrap().count(), 0);
    }
}
