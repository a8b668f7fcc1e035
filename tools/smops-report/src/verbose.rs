//! Diagnostic logging for report runs.
//!
//! Three output levels controlled by CLI flags:
//! - **Quiet** (`-q`): errors + summary only
//! - **Default** (no flag): configuration and skip notices + errors + summary
//! - **Verbose** (`-v`): everything, including file reads, charts and timings
//!
//! Diagnostics go to stderr; stdout carries only the summary.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// Output verbosity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    Quiet = 0,
    Default = 1,
    Verbose = 2,
}

/// Global verbosity level, set once at startup.
static VERBOSITY: AtomicU8 = AtomicU8::new(1); // Default

/// Initialize the verbosity level for the current process.
pub fn init(quiet: bool, verbose: bool) {
    let level = if quiet {
        Verbosity::Quiet
    } else if verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Default
    };
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Returns the current verbosity level.
fn verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Default,
    }
}

/// Returns `true` if verbose mode is active.
pub fn is_verbose() -> bool {
    verbosity() == Verbosity::Verbose
}

/// Returns `true` if quiet mode is active.
pub fn is_quiet() -> bool {
    verbosity() == Verbosity::Quiet
}

/// Log a message only when verbose mode is enabled.
///
/// ```ignore
/// vprintln!("  read {}", path.display());
/// ```
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use vprintln;

/// Log a message at default verbosity and above (suppressed in quiet mode).
///
/// ```ignore
/// dprintln!("Skipping {op} {ty}: {err}");
/// ```
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use dprintln;

/// RAII timer that logs elapsed duration on drop when verbose mode is active.
///
/// ```ignore
/// let _t = Timer::start(format!("{op} {ty}"));
/// // ... work ...
/// // logs "  mm float: 42ms" on drop
/// ```
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Begin timing a labeled step.
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if is_verbose() {
            let elapsed = self.start.elapsed();
            eprintln!("  {}: {:.1?}", self.label, elapsed);
        }
    }
}
