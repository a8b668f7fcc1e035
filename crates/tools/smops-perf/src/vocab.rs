//! Fixed benchmark vocabulary and the layout of a report run.
//!
//! The operation codes, type names and default dimensions match the names
//! used by the SMOPS benchmark driver when it writes its result files, so they
//! must not change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// Suffix appended to every trial file name.
pub const TRIAL_SUFFIX: &str = ".in.out";

/// Number of trials recorded per trial file.
pub const DEFAULT_TRIALS: usize = 10;

/// Matrix dimensions benchmarked by default, in column order.
pub const DEFAULT_DIMENSIONS: [u32; 4] = [64, 128, 256, 1024];

/// A benchmarked matrix operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Matrix addition.
    #[serde(rename = "ad")]
    Addition,
    /// Matrix-matrix multiplication.
    #[serde(rename = "mm")]
    MatrixMultiplication,
    /// Multiplication by a scalar.
    #[serde(rename = "sm")]
    ScalarMultiplication,
    /// Transpose.
    #[serde(rename = "tr")]
    Transpose,
    /// Trace.
    #[serde(rename = "ts")]
    Trace,
}

impl Operation {
    /// Every operation, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Addition,
        Self::MatrixMultiplication,
        Self::ScalarMultiplication,
        Self::Transpose,
        Self::Trace,
    ];

    /// Short code used in directory and chart file names.
    pub fn code(self) -> &'static str {
        match self {
            Self::Addition => "ad",
            Self::MatrixMultiplication => "mm",
            Self::ScalarMultiplication => "sm",
            Self::Transpose => "tr",
            Self::Trace => "ts",
        }
    }

    /// Human-readable label used in chart titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Addition => "Addition",
            Self::MatrixMultiplication => "Matrix Multiplication",
            Self::ScalarMultiplication => "Scalar Multiplication",
            Self::Transpose => "Transpose",
            Self::Trace => "Trace",
        }
    }

    /// Look up an operation by its short code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Element type of the benchmarked matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// Floating-point elements.
    Float,
    /// Integer elements.
    Int,
}

impl ElementType {
    /// Every element type, in reporting order.
    pub const ALL: [Self; 2] = [Self::Float, Self::Int];

    /// Name used in trial and chart file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
        }
    }

    /// Look up an element type by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which half of a configuration's row pair a chart or speed-up refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Time spent loading the input matrices.
    Load,
    /// Time spent in the operation itself.
    Operation,
}

impl Metric {
    /// Offset of this metric inside a configuration's row pair.
    pub fn row_offset(self) -> usize {
        match self {
            Self::Load => 0,
            Self::Operation => 1,
        }
    }

    /// Name used in chart titles and summary headings.
    pub fn name(self) -> &'static str {
        match self {
            Self::Load => "Load",
            Self::Operation => "Operation",
        }
    }
}

/// A named execution configuration and the directory holding its results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Label shown in chart legends and summary lines (e.g. "4 Threads").
    pub label: String,
    /// Directory containing one sub-directory per operation code.
    pub dir: PathBuf,
}

impl Configuration {
    /// Create a configuration from a label and a results directory.
    pub fn new(label: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            dir: dir.into(),
        }
    }
}

/// Everything that determines which trial files a report reads.
///
/// The first configuration is the baseline every speed-up is computed
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Execution configurations, baseline first.
    pub configurations: Vec<Configuration>,
    /// Operations to report on.
    pub operations: Vec<Operation>,
    /// Element types to report on.
    pub types: Vec<ElementType>,
    /// Matrix dimensions; the position of a dimension is its column index.
    pub dimensions: Vec<u32>,
    /// Trials per file. Each file holds twice as many lines.
    pub trials: usize,
    /// Suffix of every trial file name.
    pub suffix: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            configurations: vec![
                Configuration::new("Sequential", "results/sequential"),
                Configuration::new("4 Threads", "results/thread4"),
                Configuration::new("8 Threads", "results/thread8"),
            ],
            operations: Operation::ALL.to_vec(),
            types: ElementType::ALL.to_vec(),
            dimensions: DEFAULT_DIMENSIONS.to_vec(),
            trials: DEFAULT_TRIALS,
            suffix: TRIAL_SUFFIX.to_string(),
        }
    }
}

impl Layout {
    /// Check that the layout can produce a non-empty result matrix.
    pub fn validate(&self) -> Result<()> {
        if self.configurations.is_empty() {
            return Err(ReportError::Config("no configurations".into()));
        }
        if self.dimensions.is_empty() {
            return Err(ReportError::Config("no dimensions".into()));
        }
        if self.dimensions.contains(&0) {
            return Err(ReportError::Config("dimensions must be positive".into()));
        }
        if self.trials == 0 {
            return Err(ReportError::Config("trial count must be positive".into()));
        }
        Ok(())
    }

    /// Path of the trial file for one configuration directory and cell.
    pub fn trial_path(
        &self,
        config_dir: &Path,
        operation: Operation,
        ty: ElementType,
        dimension: u32,
    ) -> PathBuf {
        config_dir
            .join(operation.code())
            .join(format!("{}{dimension}{}", ty.name(), self.suffix))
    }

    /// Column holding the largest dimension, with that dimension.
    pub fn largest_dimension(&self) -> Option<(usize, u32)> {
        self.dimensions
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|&(_, dim)| dim)
    }

    /// Rows of the result matrix: two per configuration.
    pub fn rows(&self) -> usize {
        2 * self.configurations.len()
    }
}
