//! Speed-up ratios between configurations.

use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::matrix::ResultMatrix;
use crate::vocab::{ElementType, Layout, Metric, Operation};

/// Text reported in place of a ratio whose comparison time is zero.
pub const UNDEFINED: &str = "undefined";

/// Ratio `matrix[baseline_row][column] / matrix[comparison_row][column]`.
///
/// A zero comparison cell is reported as [`ReportError::DivisionByZero`]
/// instead of producing an infinite or NaN ratio.
pub fn speed_up(
    matrix: &ResultMatrix,
    baseline_row: usize,
    comparison_row: usize,
    column: usize,
) -> Result<f64> {
    let baseline = matrix
        .get(baseline_row, column)
        .ok_or(ReportError::OutOfRange { row: baseline_row, column })?;
    let comparison = matrix
        .get(comparison_row, column)
        .ok_or(ReportError::OutOfRange { row: comparison_row, column })?;

    if comparison == 0.0 {
        return Err(ReportError::DivisionByZero { row: comparison_row, column });
    }
    Ok(baseline / comparison)
}

/// Format a ratio with four decimals, or [`UNDEFINED`].
pub fn format_speed_up(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{r:.4}"),
        None => UNDEFINED.to_string(),
    }
}

/// Speed-ups of one non-baseline configuration over the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSpeedUp {
    /// Configuration label.
    pub label: String,
    /// Load-time speed-up, `None` if undefined.
    pub load: Option<f64>,
    /// Operation-time speed-up, `None` if undefined.
    pub operation: Option<f64>,
}

impl ConfigSpeedUp {
    /// Speed-up for the given metric.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Load => self.load,
            Metric::Operation => self.operation,
        }
    }
}

/// Speed-ups of every configuration for one (operation, type) pair, measured
/// at the largest dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSpeedUps {
    /// Operation the pair refers to.
    pub operation: Operation,
    /// Element type the pair refers to.
    #[serde(rename = "type")]
    pub ty: ElementType,
    /// Dimension the ratios are measured at.
    pub dimension: u32,
    /// One entry per non-baseline configuration, in layout order.
    pub configurations: Vec<ConfigSpeedUp>,
}

impl PairSpeedUps {
    /// Compute speed-ups of every non-baseline configuration over the first.
    ///
    /// Division by zero yields an undefined ratio; any other error is
    /// returned.
    pub fn compute(
        layout: &Layout,
        matrix: &ResultMatrix,
        operation: Operation,
        ty: ElementType,
    ) -> Result<Self> {
        layout.validate()?;
        let (column, dimension) = layout
            .largest_dimension()
            .ok_or_else(|| ReportError::Config("no dimensions".into()))?;

        let ratio = |config: usize, metric: Metric| -> Result<Option<f64>> {
            match speed_up(
                matrix,
                ResultMatrix::metric_row(0, metric),
                ResultMatrix::metric_row(config, metric),
                column,
            ) {
                Ok(r) => Ok(Some(r)),
                Err(ReportError::DivisionByZero { .. }) => Ok(None),
                Err(e) => Err(e),
            }
        };

        let configurations = layout
            .configurations
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, config)| -> Result<ConfigSpeedUp> {
                Ok(ConfigSpeedUp {
                    label: config.label.clone(),
                    load: ratio(idx, Metric::Load)?,
                    operation: ratio(idx, Metric::Operation)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            operation,
            ty,
            dimension,
            configurations,
        })
    }
}
