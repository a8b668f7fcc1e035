//! Error types for result aggregation and reporting.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while aggregating or reporting benchmark results.
#[derive(Debug)]
pub enum ReportError {
    /// A trial file is absent, too short, or contains a non-numeric sample.
    MissingData {
        /// Trial file that was being read.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
    /// The comparison cell of a speed-up is zero.
    DivisionByZero {
        /// Row of the zero-valued comparison cell.
        row: usize,
        /// Column of the zero-valued comparison cell.
        column: usize,
    },
    /// A row or column lies outside the result matrix.
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        column: usize,
    },
    /// Writing a chart or summary file failed.
    Io {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The report layout cannot produce a result matrix.
    Config(String),
}

impl ReportError {
    pub(crate) fn missing(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MissingData {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingData { path, reason } => {
                write!(f, "missing data in {}: {reason}", path.display())
            }
            Self::DivisionByZero { row, column } => {
                write!(f, "division by zero: cell ({row}, {column}) is zero")
            }
            Self::OutOfRange { row, column } => {
                write!(f, "cell ({row}, {column}) is outside the result matrix")
            }
            Self::Io { path, source } => write!(f, "writing {}: {source}", path.display()),
            Self::Config(msg) => write!(f, "invalid layout: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ReportError> = std::result::Result<T, E>;
