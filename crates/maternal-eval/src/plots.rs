//! SVG charts rendered with plotters.
//!
//! Charts are drawn into an in-memory SVG string and then written in one
//! step, so a failed render never leaves a half-written file behind.

use std::fs;
use std::path::Path;

use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::confusion::ConfusionMatrix;
use crate::error::EvalError;

const CHART_SIZE: (u32, u32) = (640, 560);
const BAR_CHART_SIZE: (u32, u32) = (720, 480);
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Heat-map of a confusion matrix with each cell's count written in it.
pub fn save_confusion_matrix(cm: &ConfusionMatrix, out_path: &Path) -> Result<(), EvalError> {
    let n = cm.n_labels();
    if n == 0 {
        return Err(EvalError::Empty);
    }
    let labels = cm.labels();
    let max = cm.max_count().max(1) as f64;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Confusion Matrix", ("sans-serif", 22).into_font())
            .margin(16)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())
            .map_err(render)?;

        // Row 0 is drawn at the top, so y segments count down.
        let x_label = |v: &SegmentValue<usize>| segment_label(v, labels, false);
        let y_label = |v: &SegmentValue<usize>| segment_label(v, labels, true);
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Predicted label")
            .y_desc("True label")
            .x_labels(n)
            .y_labels(n)
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .draw()
            .map_err(render)?;

        chart
            .draw_series(cm.rows().iter().enumerate().flat_map(|(row, counts)| {
                counts.iter().enumerate().map(move |(col, &count)| {
                    let y = n - 1 - row;
                    Rectangle::new(
                        [
                            (SegmentValue::Exact(col), SegmentValue::Exact(y)),
                            (SegmentValue::Exact(col + 1), SegmentValue::Exact(y + 1)),
                        ],
                        heat(count as f64 / max).filled(),
                    )
                })
            }))
            .map_err(render)?;

        let centered = Pos::new(HPos::Center, VPos::Center);
        chart
            .draw_series(cm.rows().iter().enumerate().flat_map(|(row, counts)| {
                counts.iter().enumerate().map(move |(col, &count)| {
                    let color = if count as f64 / max > 0.5 { WHITE } else { BLACK };
                    Text::new(
                        count.to_string(),
                        (SegmentValue::CenterOf(col), SegmentValue::CenterOf(n - 1 - row)),
                        ("sans-serif", 18).into_font().color(&color).pos(centered),
                    )
                })
            }))
            .map_err(render)?;

        root.present().map_err(render)?;
    }

    write_svg(out_path, &svg)
}

/// Vertical bar chart of one score per model, in the given order.
pub fn save_bar_chart(
    bars: &[(String, f64)],
    title: &str,
    y_desc: &str,
    out_path: &Path,
) -> Result<(), EvalError> {
    if bars.is_empty() {
        return Err(EvalError::Empty);
    }
    let n = bars.len();
    let names: Vec<String> = bars.iter().map(|(name, _)| name.clone()).collect();
    let y_max = bars
        .iter()
        .map(|(_, v)| *v)
        .fold(1.0_f64, f64::max);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, BAR_CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22).into_font())
            .margin(16)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)
            .map_err(render)?;

        let x_label = |v: &SegmentValue<usize>| segment_label(v, &names, false);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&x_label)
            .x_desc("model_key")
            .y_desc(y_desc)
            .draw()
            .map_err(render)?;

        chart
            .draw_series(bars.iter().enumerate().map(|(idx, (_, value))| {
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(idx), 0.0),
                        (SegmentValue::Exact(idx + 1), *value),
                    ],
                    BAR_COLOR.filled(),
                );
                bar.set_margin(0, 0, 12, 12);
                bar
            }))
            .map_err(render)?;

        root.present().map_err(render)?;
    }

    write_svg(out_path, &svg)
}

fn segment_label(value: &SegmentValue<usize>, labels: &[String], flipped: bool) -> String {
    let SegmentValue::CenterOf(idx) = value else {
        return String::new();
    };
    let idx = if flipped {
        labels.len().checked_sub(idx + 1)
    } else {
        Some(*idx)
    };
    idx.and_then(|i| labels.get(i)).cloned().unwrap_or_default()
}

/// White to dark blue as `shade` goes from 0 to 1.
fn heat(shade: f64) -> RGBColor {
    let shade = shade.clamp(0.0, 1.0);
    let channel = |light: f64, dark: f64| (light + (dark - light) * shade).round() as u8;
    RGBColor(channel(247.0, 8.0), channel(251.0, 48.0), channel(255.0, 107.0))
}

fn write_svg(out_path: &Path, svg: &str) -> Result<(), EvalError> {
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| io_error(out_path, e))?;
    }
    fs::write(out_path, svg).map_err(|e| io_error(out_path, e))?;
    tracing::debug!(path = %out_path.display(), "chart written");
    Ok(())
}

fn render(err: impl std::fmt::Display) -> EvalError {
    EvalError::Render(err.to_string())
}

fn io_error(path: &Path, source: std::io::Error) -> EvalError {
    EvalError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipped_labels_count_from_the_top() {
        let labels = vec!["low".to_string(), "mid".to_string(), "high".to_string()];
        assert_eq!(segment_label(&SegmentValue::CenterOf(0), &labels, true), "high");
        assert_eq!(segment_label(&SegmentValue::CenterOf(2), &labels, true), "low");
        assert_eq!(segment_label(&SegmentValue::CenterOf(0), &labels, false), "low");
        assert_eq!(segment_label(&SegmentValue::Last, &labels, false), "");
    }

    #[test]
    fn heat_runs_light_to_dark() {
        assert_eq!(heat(0.0), RGBColor(247, 251, 255));
        assert_eq!(heat(1.0), RGBColor(8, 48, 107));
    }
}
