//! Result aggregation and reporting for SMOPS benchmarks.
//!
//! Reads the trial files recorded by the benchmark driver, averages the
//! interleaved load and operation samples, computes speed-ups of threaded
//! configurations over the sequential baseline, and renders log-log
//! comparison charts and text summaries.

pub mod chart;
pub mod error;
pub mod matrix;
pub mod speedup;
pub mod summary;
pub mod trial;
pub mod vocab;

pub use chart::{chart_title, render_chart_png, render_comparison_chart};
pub use error::{ReportError, Result};
pub use matrix::{ResultMatrix, build_result_matrix};
pub use speedup::{ConfigSpeedUp, PairSpeedUps, format_speed_up, speed_up};
pub use summary::{format_pair_summary, print_pair_summary, save_summary};
pub use trial::{TrialAverages, average_trials, load_and_average};
pub use vocab::{Configuration, ElementType, Layout, Metric, Operation};
