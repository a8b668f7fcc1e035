//! Log-log comparison charts of averaged timings.
//!
//! Each chart plots one metric (load or operation time) for every
//! configuration against matrix dimension, with both axes on a logarithmic
//! scale. Charts are rasterised in memory and written as PNG files.

pub mod canvas;
pub mod font;
pub mod png;

use std::path::Path;

use canvas::{Canvas, Rgb, Stroke};

use crate::error::{ReportError, Result};
use crate::matrix::ResultMatrix;
use crate::speedup::{format_speed_up, speed_up};
use crate::vocab::{ElementType, Layout, Metric, Operation};

/// Chart width in pixels.
pub const CHART_WIDTH: u32 = 640;
/// Chart height in pixels.
pub const CHART_HEIGHT: u32 = 480;

const MARGIN_LEFT: i64 = 88;
const MARGIN_RIGHT: i64 = 24;
const MARGIN_TOP: i64 = 44;
const MARGIN_BOTTOM: i64 = 56;
const TICK_LEN: i64 = 5;
const MARKER_SIZE: u32 = 5;

/// Series colours, baseline first.
const PALETTE: [Rgb; 6] = [
    Rgb(0xD6, 0x27, 0x28),
    Rgb(0x1F, 0x77, 0xB4),
    Rgb(0x2C, 0xA0, 0x2C),
    Rgb(0xFF, 0x7F, 0x0E),
    Rgb(0x94, 0x67, 0xBD),
    Rgb(0x8C, 0x56, 0x4B),
];

/// Stroke used for the series of configuration `idx`.
fn series_stroke(idx: usize) -> Stroke {
    let color = PALETTE[idx % PALETTE.len()];
    if idx == 0 {
        Stroke::dashed(color, 2, 8, 5)
    } else {
        Stroke::solid(color, 2)
    }
}

/// Maps values onto a pixel range on a base-10 logarithmic scale.
#[derive(Debug, Clone, Copy)]
struct LogAxis {
    lo: f64,
    hi: f64,
    start: f64,
    end: f64,
}

impl LogAxis {
    /// Axis spanning `min..=max` (both positive) with 5% padding per side.
    ///
    /// A degenerate range is widened to one decade around the value.
    fn new(min: f64, max: f64, start: i64, end: i64) -> Self {
        let (mut lo, mut hi) = (min.log10(), max.log10());
        let pad = if hi - lo < 1e-9 { 0.5 } else { (hi - lo) * 0.05 };
        lo -= pad;
        hi += pad;
        Self {
            lo,
            hi,
            start: start as f64,
            end: end as f64,
        }
    }

    /// Axis over the positive values in `values`, or one decade around 1.
    fn fit(values: impl IntoIterator<Item = f64>, start: i64, end: i64) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite() && *v > 0.0)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            Self::new(1.0, 1.0, start, end)
        } else {
            Self::new(min, max, start, end)
        }
    }

    fn map(&self, value: f64) -> i64 {
        let t = (value.log10() - self.lo) / (self.hi - self.lo);
        (self.start + t * (self.end - self.start)).round() as i64
    }

    /// Exponents of the powers of ten inside the axis range.
    fn decades(&self) -> impl Iterator<Item = i32> {
        (self.lo.ceil() as i32)..=(self.hi.floor() as i32)
    }
}

/// Tick label for `10^exp`.
fn decade_label(exp: i32) -> String {
    if (0..=4).contains(&exp) {
        format!("{}", 10_u32.pow(exp.unsigned_abs()))
    } else {
        format!("1e{exp}")
    }
}

/// Title of the chart for `metric`.
///
/// With exactly two configurations the speed-up at the largest dimension is
/// appended.
pub fn chart_title(
    matrix: &ResultMatrix,
    layout: &Layout,
    operation: Operation,
    ty: ElementType,
    metric: Metric,
) -> String {
    let mut title = format!("{} {} Times Type: {}", operation.label(), metric.name(), ty.name());
    if layout.configurations.len() == 2 {
        if let Some((column, _)) = layout.largest_dimension() {
            let ratio = speed_up(
                matrix,
                ResultMatrix::metric_row(0, metric),
                ResultMatrix::metric_row(1, metric),
                column,
            )
            .ok();
            title.push_str("  Speed Up: ");
            title.push_str(&format_speed_up(ratio));
        }
    }
    title
}

/// Rasterise the comparison chart for `metric` and encode it as PNG.
pub fn render_chart_png(
    matrix: &ResultMatrix,
    layout: &Layout,
    operation: Operation,
    ty: ElementType,
    metric: Metric,
) -> Result<Vec<u8>> {
    layout.validate()?;
    let (rows, cols) = matrix.shape();
    if rows < layout.rows() || cols != layout.dimensions.len() {
        return Err(ReportError::Config(format!(
            "matrix is {rows}x{cols}, layout needs {}x{}",
            layout.rows(),
            layout.dimensions.len()
        )));
    }

    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT, Rgb::WHITE);
    let left = MARGIN_LEFT;
    let right = i64::from(CHART_WIDTH) - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = i64::from(CHART_HEIGHT) - MARGIN_BOTTOM;

    let x_axis = LogAxis::fit(layout.dimensions.iter().map(|&d| f64::from(d)), left, right);
    let series_rows: Vec<&[f64]> = (0..layout.configurations.len())
        .map(|c| matrix.row(ResultMatrix::metric_row(c, metric)))
        .collect();
    let y_axis = LogAxis::fit(series_rows.iter().flat_map(|r| r.iter().copied()), bottom, top);

    // Grid and ticks.
    for exp in y_axis.decades() {
        let y = y_axis.map(10_f64.powi(exp));
        canvas.draw_polyline(&[(left, y), (right, y)], Stroke::solid(Rgb::GRID, 1));
        canvas.draw_polyline(&[(left - TICK_LEN, y), (left, y)], Stroke::solid(Rgb::BLACK, 1));
        let label = decade_label(exp);
        let w = i64::from(font::text_width(&label, 1));
        canvas.draw_text(left - TICK_LEN - 4 - w, y - 3, &label, Rgb::BLACK, 1);
    }
    for &dim in &layout.dimensions {
        let x = x_axis.map(f64::from(dim));
        canvas.draw_polyline(&[(x, top), (x, bottom)], Stroke::solid(Rgb::GRID, 1));
        canvas.draw_polyline(&[(x, bottom), (x, bottom + TICK_LEN)], Stroke::solid(Rgb::BLACK, 1));
        let label = dim.to_string();
        let w = i64::from(font::text_width(&label, 1));
        canvas.draw_text(x - w / 2, bottom + TICK_LEN + 4, &label, Rgb::BLACK, 1);
    }
    canvas.stroke_rect(left, top, right, bottom, Rgb::BLACK);

    // Series. Non-positive samples have no place on a log axis and break the line.
    for (idx, row) in series_rows.iter().enumerate() {
        let stroke = series_stroke(idx);
        let mut run: Vec<(i64, i64)> = Vec::new();
        for (&dim, &value) in layout.dimensions.iter().zip(row.iter()) {
            if !(value.is_finite() && value > 0.0) {
                canvas.draw_polyline(&run, stroke);
                run.clear();
                continue;
            }
            let point = (x_axis.map(f64::from(dim)), y_axis.map(value));
            let half = i64::from(MARKER_SIZE / 2);
            canvas.fill_rect(point.0 - half, point.1 - half, point.0 + half, point.1 + half, stroke.color);
            run.push(point);
        }
        canvas.draw_polyline(&run, stroke);
    }

    // Legend, top left inside the plot area.
    let entry_h = 14;
    let legend_w = layout
        .configurations
        .iter()
        .map(|c| i64::from(font::text_width(&c.label, 1)))
        .max()
        .unwrap_or(0)
        + 44;
    let legend_h = entry_h * layout.configurations.len() as i64 + 8;
    let (lx, ly) = (left + 10, top + 10);
    canvas.fill_rect(lx, ly, lx + legend_w, ly + legend_h, Rgb::WHITE);
    canvas.stroke_rect(lx, ly, lx + legend_w, ly + legend_h, Rgb::BLACK);
    for (idx, config) in layout.configurations.iter().enumerate() {
        let y = ly + 8 + entry_h * idx as i64;
        let stroke = series_stroke(idx);
        canvas.draw_polyline(&[(lx + 6, y + 3), (lx + 32, y + 3)], stroke);
        canvas.draw_text(lx + 38, y, &config.label, Rgb::BLACK, 1);
    }

    // Title and axis labels.
    let title = chart_title(matrix, layout, operation, ty, metric);
    let plot_w = right - left;
    let scale = if i64::from(font::text_width(&title, 2)) <= plot_w { 2 } else { 1 };
    let title_w = i64::from(font::text_width(&title, scale));
    let title_x = (left + (plot_w - title_w) / 2).max(4);
    canvas.draw_text(title_x, (top - 8 * i64::from(scale)) / 2, &title, Rgb::BLACK, scale);

    let x_label = "Matrix Dimension";
    let w = i64::from(font::text_width(x_label, 1));
    canvas.draw_text(left + (plot_w - w) / 2, bottom + 28, x_label, Rgb::BLACK, 1);

    let y_label = "Time (s)";
    let h = i64::from(font::text_width(y_label, 1));
    canvas.draw_text_vertical(12, top + (bottom - top + h) / 2, y_label, Rgb::BLACK, 1);

    png::encode_rgb(canvas.width(), canvas.height(), canvas.pixels()).map_err(|source| {
        ReportError::Io {
            path: "<png>".into(),
            source,
        }
    })
}

/// Render the comparison chart for `metric` and write it to `output_path`.
///
/// An existing file is overwritten. The parent directory is not created.
pub fn render_comparison_chart(
    matrix: &ResultMatrix,
    layout: &Layout,
    operation: Operation,
    ty: ElementType,
    metric: Metric,
    output_path: &Path,
) -> Result<()> {
    let png = render_chart_png(matrix, layout, operation, ty, metric)?;
    std::fs::write(output_path, png).map_err(|source| ReportError::Io {
        path: output_path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Configuration;

    fn layout_with(configs: usize, dimensions: Vec<u32>) -> Layout {
        let labels = ["Sequential", "4 Threads", "8 Threads"];
        Layout {
            configurations: labels[..configs]
                .iter()
                .map(|l| Configuration::new(*l, "unused"))
                .collect(),
            dimensions,
            ..Layout::default()
        }
    }

    fn filled_matrix(layout: &Layout) -> ResultMatrix {
        let mut m = ResultMatrix::zeros(layout.rows(), layout.dimensions.len());
        for row in 0..layout.rows() {
            for (col, &dim) in layout.dimensions.iter().enumerate() {
                let v = f64::from(dim).powi(2) * 1e-7 / (row / 2 + 1) as f64;
                m.set(row, col, if row % 2 == 0 { v } else { v * 3.0 });
            }
        }
        m
    }

    fn png_size(png: &[u8]) -> (u32, u32) {
        assert_eq!(&png[..8], png::PNG_SIGNATURE);
        assert_eq!(&png[12..16], b"IHDR");
        (
            u32::from_be_bytes(png[16..20].try_into().unwrap()),
            u32::from_be_bytes(png[20..24].try_into().unwrap()),
        )
    }

    #[test]
    fn two_configuration_title_has_speed_up() {
        let layout = layout_with(2, vec![64, 128, 256, 1024]);
        let m = filled_matrix(&layout);
        assert_eq!(
            chart_title(&m, &layout, Operation::MatrixMultiplication, ElementType::Float, Metric::Load),
            "Matrix Multiplication Load Times Type: float  Speed Up: 2.0000"
        );
    }

    #[test]
    fn multi_configuration_title_has_no_speed_up() {
        let layout = layout_with(3, vec![64, 1024]);
        let m = filled_matrix(&layout);
        assert_eq!(
            chart_title(&m, &layout, Operation::Trace, ElementType::Int, Metric::Operation),
            "Trace Operation Times Type: int"
        );
    }

    #[test]
    fn zero_comparison_title_is_undefined() {
        let layout = layout_with(2, vec![64]);
        let mut m = filled_matrix(&layout);
        m.set(3, 0, 0.0);
        let title = chart_title(&m, &layout, Operation::Addition, ElementType::Int, Metric::Operation);
        assert!(title.ends_with("Speed Up: undefined"), "{title}");
    }

    #[test]
    fn chart_is_png_of_expected_size() {
        let layout = layout_with(3, vec![64, 128, 256, 1024]);
        let png = render_chart_png(
            &filled_matrix(&layout),
            &layout,
            Operation::Addition,
            ElementType::Float,
            Metric::Operation,
        )
        .unwrap();
        assert_eq!(png_size(&png), (CHART_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn rendering_is_deterministic() {
        let layout = layout_with(3, vec![64, 128, 256, 1024]);
        let m = filled_matrix(&layout);
        let a = render_chart_png(&m, &layout, Operation::Transpose, ElementType::Int, Metric::Load).unwrap();
        let b = render_chart_png(&m, &layout, Operation::Transpose, ElementType::Int, Metric::Load).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_dimension_renders() {
        let layout = layout_with(2, vec![1024]);
        let png = render_chart_png(
            &filled_matrix(&layout),
            &layout,
            Operation::ScalarMultiplication,
            ElementType::Float,
            Metric::Load,
        )
        .unwrap();
        assert_eq!(png_size(&png), (CHART_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn non_positive_samples_are_skipped() {
        let layout = layout_with(2, vec![64, 128]);
        let m = ResultMatrix::zeros(layout.rows(), 2);
        assert!(render_chart_png(&m, &layout, Operation::Trace, ElementType::Int, Metric::Load).is_ok());
    }

    #[test]
    fn mismatched_matrix_is_rejected() {
        let layout = layout_with(2, vec![64, 128]);
        let m = ResultMatrix::zeros(2, 2);
        assert!(matches!(
            render_chart_png(&m, &layout, Operation::Trace, ElementType::Int, Metric::Load),
            Err(ReportError::Config(_))
        ));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let layout = layout_with(2, vec![0, 64]);
        let m = ResultMatrix::zeros(layout.rows(), 2);
        assert!(matches!(
            render_chart_png(&m, &layout, Operation::Trace, ElementType::Int, Metric::Load),
            Err(ReportError::Config(_))
        ));
    }

    #[test]
    fn writes_and_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mmfloat.png");
        std::fs::write(&path, b"stale").unwrap();

        let layout = layout_with(2, vec![64, 128, 256, 1024]);
        let m = filled_matrix(&layout);
        render_comparison_chart(&m, &layout, Operation::MatrixMultiplication, ElementType::Float, Metric::Load, &path)
            .unwrap();
        let written = std::fs::read(&path).unwrap();
        assert_eq!(png_size(&written), (CHART_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn missing_output_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphs").join("fileload").join("mmfloat.png");
        let layout = layout_with(2, vec![64]);
        let m = filled_matrix(&layout);
        let err = render_comparison_chart(&m, &layout, Operation::MatrixMultiplication, ElementType::Float, Metric::Load, &path)
            .unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
        assert!(!dir.path().join("graphs").exists());
    }

    #[test]
    fn log_axis_maps_decades_linearly() {
        let axis = LogAxis {
            lo: 0.0,
            hi: 2.0,
            start: 0.0,
            end: 200.0,
        };
        assert_eq!(axis.map(1.0), 0);
        assert_eq!(axis.map(10.0), 100);
        assert_eq!(axis.map(100.0), 200);
        assert_eq!(axis.decades().collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn decade_labels() {
        assert_eq!(decade_label(0), "1");
        assert_eq!(decade_label(3), "1000");
        assert_eq!(decade_label(-2), "1e-2");
        assert_eq!(decade_label(6), "1e6");
    }
}
