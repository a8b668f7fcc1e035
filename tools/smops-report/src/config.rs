//! Report configuration loaded from `report.toml`.
//!
//! Every key is optional; anything left out keeps the layout the benchmark
//! scripts have always used:
//!
//! ```toml
//! trials = 10
//! suffix = ".in.out"
//! dimensions = [64, 128, 256, 1024]
//! operations = ["ad", "mm", "sm", "tr", "ts"]
//! types = ["float", "int"]
//!
//! [output]
//! fileload_dir = "results/graphs/fileload"
//! operation_dir = "results/graphs/operation"
//!
//! [[configurations]]
//! label = "Sequential"
//! dir = "results/sequential"
//!
//! [[configurations]]
//! label = "4 Threads"
//! dir = "results/thread4"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use smops_perf::{Configuration, ElementType, Layout, Metric, Operation};
use std::path::{Path, PathBuf};

/// File looked up in the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "report.toml";

/// On-disk shape of `report.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReportFile {
    trials: Option<usize>,
    suffix: Option<String>,
    dimensions: Option<Vec<u32>>,
    operations: Option<Vec<Operation>>,
    types: Option<Vec<ElementType>>,
    output: Option<OutputSection>,
    configurations: Option<Vec<Configuration>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    fileload_dir: Option<PathBuf>,
    operation_dir: Option<PathBuf>,
}

/// Resolved settings for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Which trial files to read.
    pub layout: Layout,
    /// Directory receiving load-time charts.
    pub fileload_dir: PathBuf,
    /// Directory receiving operation-time charts.
    pub operation_dir: PathBuf,
    /// File the settings came from, if any.
    pub source: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            fileload_dir: PathBuf::from("results/graphs/fileload"),
            operation_dir: PathBuf::from("results/graphs/operation"),
            source: None,
        }
    }
}

impl ReportConfig {
    /// Load settings from `path`, or from `report.toml` in the current
    /// directory if it exists, or fall back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config =
            Self::from_toml(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
        config.source = Some(path);
        Ok(config)
    }

    /// Parse settings from TOML text, filling unset keys with defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: ReportFile = toml::from_str(text)?;
        let mut config = Self::default();
        let layout = &mut config.layout;

        if let Some(trials) = file.trials {
            layout.trials = trials;
        }
        if let Some(suffix) = file.suffix {
            layout.suffix = suffix;
        }
        if let Some(dimensions) = file.dimensions {
            layout.dimensions = dimensions;
        }
        if let Some(operations) = file.operations {
            layout.operations = operations;
        }
        if let Some(types) = file.types {
            layout.types = types;
        }
        if let Some(configurations) = file.configurations {
            layout.configurations = configurations;
        }
        if let Some(output) = file.output {
            if let Some(dir) = output.fileload_dir {
                config.fileload_dir = dir;
            }
            if let Some(dir) = output.operation_dir {
                config.operation_dir = dir;
            }
        }

        config.layout.validate()?;
        Ok(config)
    }

    /// Where the chart for `metric` of one pair is written.
    pub fn chart_path(&self, operation: Operation, ty: ElementType, metric: Metric) -> PathBuf {
        let dir = match metric {
            Metric::Load => &self.fileload_dir,
            Metric::Operation => &self.operation_dir,
        };
        dir.join(format!("{}{}.png", operation.code(), ty.name()))
    }

    /// Print the resolved settings.
    pub fn print(&self) {
        match &self.source {
            Some(path) => eprintln!("Configuration: {}", path.display()),
            None => eprintln!("Configuration: built-in defaults"),
        }
        for (idx, config) in self.layout.configurations.iter().enumerate() {
            let role = if idx == 0 { " (baseline)" } else { "" };
            eprintln!("  {:<12} {}{role}", config.label, config.dir.display());
        }
        eprintln!("  dimensions:  {:?}", self.layout.dimensions);
        eprintln!("  trials:      {}", self.layout.trials);
        eprintln!("  load charts: {}", self.fileload_dir.display());
        eprintln!("  op charts:   {}", self.operation_dir.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = ReportConfig::from_toml("").unwrap();
        assert_eq!(config.layout, Layout::default());
        assert_eq!(config.fileload_dir, PathBuf::from("results/graphs/fileload"));
        assert_eq!(config.operation_dir, PathBuf::from("results/graphs/operation"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ReportConfig::from_toml(
            r#"
            dimensions = [1024]
            operations = ["mm", "ts"]
            types = ["int"]

            [output]
            fileload_dir = "out/load"

            [[configurations]]
            label = "Sequential"
            dir = "seq"

            [[configurations]]
            label = "Threaded"
            dir = "thrd"
            "#,
        )
        .unwrap();

        let layout = &config.layout;
        assert_eq!(layout.dimensions, [1024]);
        assert_eq!(layout.operations, [Operation::MatrixMultiplication, Operation::Trace]);
        assert_eq!(layout.types, [ElementType::Int]);
        assert_eq!(layout.configurations.len(), 2);
        assert_eq!(layout.configurations[1], Configuration::new("Threaded", "thrd"));
        assert_eq!(config.fileload_dir, PathBuf::from("out/load"));
        assert_eq!(config.operation_dir, PathBuf::from("results/graphs/operation"));
    }

    #[test]
    fn unknown_operation_code_is_rejected() {
        assert!(ReportConfig::from_toml(r#"operations = ["mv"]"#).is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(ReportConfig::from_toml("trails = 5").is_err());
    }

    #[test]
    fn empty_dimension_list_is_rejected() {
        assert!(ReportConfig::from_toml("dimensions = []").is_err());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(ReportConfig::from_toml("dimensions = [0, 64]").is_err());
    }

    #[test]
    fn chart_paths() {
        let config = ReportConfig::default();
        assert_eq!(
            config.chart_path(Operation::MatrixMultiplication, ElementType::Float, Metric::Load),
            PathBuf::from("results/graphs/fileload/mmfloat.png")
        );
        assert_eq!(
            config.chart_path(Operation::Addition, ElementType::Int, Metric::Operation),
            PathBuf::from("results/graphs/operation/adint.png")
        );
    }

    #[test]
    fn explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ReportConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn explicit_file_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.toml");
        std::fs::write(&path, "trials = 5\n").unwrap();
        let config = ReportConfig::load(Some(&path)).unwrap();
        assert_eq!(config.layout.trials, 5);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }
}
