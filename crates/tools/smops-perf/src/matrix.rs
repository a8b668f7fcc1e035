//! Averaged timings for one (operation, type) pair.

use crate::error::Result;
use crate::trial::{TrialAverages, load_and_average};
use crate::vocab::{ElementType, Layout, Metric, Operation};

/// Row-major table of averaged timings.
///
/// Each configuration owns two consecutive rows: the even row holds average
/// load times and the odd row average operation times. Columns follow the
/// layout's dimension order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl ResultMatrix {
    /// A matrix of the given shape filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Value at `(row, col)`, or `None` if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    /// Overwrite the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) out of range");
        self.data[row * self.cols + col] = value;
    }

    /// All columns of one row.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Row holding `metric` for the configuration at index `config`.
    pub fn metric_row(config: usize, metric: Metric) -> usize {
        2 * config + metric.row_offset()
    }

    /// Store one cell's averages in the row pair of configuration `config`.
    pub fn store(&mut self, config: usize, col: usize, averages: TrialAverages) {
        self.set(Self::metric_row(config, Metric::Load), col, averages.load);
        self.set(
            Self::metric_row(config, Metric::Operation),
            col,
            averages.operation,
        );
    }
}

/// Read and average every trial file of one (operation, type) pair.
///
/// Fails on the first cell whose trial file is missing or malformed.
pub fn build_result_matrix(
    layout: &Layout,
    operation: Operation,
    ty: ElementType,
) -> Result<ResultMatrix> {
    layout.validate()?;
    let mut matrix = ResultMatrix::zeros(layout.rows(), layout.dimensions.len());

    for (config_idx, config) in layout.configurations.iter().enumerate() {
        for (col, &dimension) in layout.dimensions.iter().enumerate() {
            let averages = load_and_average(layout, &config.dir, operation, ty, dimension)?;
            matrix.store(config_idx, col, averages);
        }
    }

    Ok(matrix)
}
