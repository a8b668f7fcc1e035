//! Trial file parsing and averaging.
//!
//! A trial file holds one floating-point sample per line. Samples alternate
//! between load time (even lines) and operation time (odd lines), one pair per
//! trial, load first.

use std::path::Path;

use crate::error::{ReportError, Result};
use crate::vocab::{ElementType, Layout, Operation};

/// Mean load and operation time over every trial in one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialAverages {
    /// Mean time to load the input matrices, in seconds.
    pub load: f64,
    /// Mean time spent in the operation, in seconds.
    pub operation: f64,
}

/// Average the interleaved samples of `trials` trials held in `text`.
///
/// Exactly `2 * trials` leading lines are consumed; anything after them is
/// ignored. Returns a description of the problem if there are fewer lines or
/// one of them is not a number.
pub fn average_trials(text: &str, trials: usize) -> Result<TrialAverages, String> {
    let wanted = 2 * trials;
    let (load_sum, op_sum, seen) = text.lines().take(wanted).enumerate().try_fold(
        (0.0_f64, 0.0_f64, 0_usize),
        |(load, op, _), (idx, line)| -> Result<(f64, f64, usize), String> {
            let sample: f64 = line
                .trim()
                .parse()
                .map_err(|_| format!("line {}: {:?} is not a number", idx + 1, line.trim()))?;
            Ok(if idx % 2 == 0 {
                (load + sample, op, idx + 1)
            } else {
                (load, op + sample, idx + 1)
            })
        },
    )?;

    if seen < wanted {
        return Err(format!("expected {wanted} samples, found {seen}"));
    }

    let n = trials as f64;
    Ok(TrialAverages {
        load: load_sum / n,
        operation: op_sum / n,
    })
}

/// Read the trial file for one cell and average its load and operation samples.
///
/// The file lives at
/// `<config_dir>/<operation code>/<type name><dimension><suffix>`.
pub fn load_and_average(
    layout: &Layout,
    config_dir: &Path,
    operation: Operation,
    ty: ElementType,
    dimension: u32,
) -> Result<TrialAverages> {
    let path = layout.trial_path(config_dir, operation, ty, dimension);
    let text = std::fs::read_to_string(&path)
        .map_err(|e| ReportError::missing(&path, e.to_string()))?;
    average_trials(&text, layout.trials).map_err(|reason| ReportError::missing(&path, reason))
}
