//! Console summary and JSON export of speed-up results.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::speedup::{PairSpeedUps, format_speed_up};
use crate::vocab::Metric;

/// Render the summary block for one (operation, type) pair.
///
/// ```text
/// mm float
/// Operation Speed Up for Dimension 1024
/// 	4 Threads Speed Up: 2.0000
/// Load Speed Up for Dimension 1024
/// 	4 Threads Speed Up: 2.0000
///
/// ```
pub fn format_pair_summary(pair: &PairSpeedUps) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{} {}", pair.operation.code(), pair.ty.name());
    for metric in [Metric::Operation, Metric::Load] {
        let _ = writeln!(
            out,
            "{} Speed Up for Dimension {}",
            metric.name(),
            pair.dimension
        );
        for config in &pair.configurations {
            let _ = writeln!(
                out,
                "\t{} Speed Up: {}",
                config.label,
                format_speed_up(config.get(metric))
            );
        }
    }
    out.push('\n');
    out
}

/// Print the summary block for one pair to stdout.
pub fn print_pair_summary(pair: &PairSpeedUps) {
    print!("{}", format_pair_summary(pair));
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    pairs: &'a [PairSpeedUps],
}

/// Save the speed-ups of every reported pair as a JSON file.
///
/// Undefined ratios are written as `null`.
pub fn save_summary(pairs: &[PairSpeedUps], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&SummaryFile { pairs })
        .map_err(|e| ReportError::Io {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    std::fs::write(path, json).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speedup::ConfigSpeedUp;
    use crate::vocab::{ElementType, Operation};

    fn sample_pair() -> PairSpeedUps {
        PairSpeedUps {
            operation: Operation::MatrixMultiplication,
            ty: ElementType::Float,
            dimension: 1024,
            configurations: vec![
                ConfigSpeedUp {
                    label: "4 Threads".into(),
                    load: Some(2.0),
                    operation: Some(3.5),
                },
                ConfigSpeedUp {
                    label: "8 Threads".into(),
                    load: Some(1.25),
                    operation: None,
                },
            ],
        }
    }

    #[test]
    fn summary_block_layout() {
        let text = format_pair_summary(&sample_pair());
        assert_eq!(
            text,
            "mm float\n\
             Operation Speed Up for Dimension 1024\n\
             \t4 Threads Speed Up: 3.5000\n\
             \t8 Threads Speed Up: undefined\n\
             Load Speed Up for Dimension 1024\n\
             \t4 Threads Speed Up: 2.0000\n\
             \t8 Threads Speed Up: 1.2500\n\
             \n"
        );
    }

    #[test]
    fn summary_json_uses_codes_and_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        save_summary(&[sample_pair()], &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let pair = &value["pairs"][0];
        assert_eq!(pair["operation"], "mm");
        assert_eq!(pair["type"], "float");
        assert_eq!(pair["dimension"], 1024);
        assert_eq!(pair["configurations"][0]["load"], 2.0);
        assert!(pair["configurations"][1]["operation"].is_null());
    }

    #[test]
    fn summary_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("summary.json");
        assert!(matches!(
            save_summary(&[sample_pair()], &path),
            Err(ReportError::Io { .. })
        ));
    }
}
