// src/utils/chart.rs

use plotters::prelude::*;
use std::ops::Range;

use crate::error::ChartError;
use crate::prediction::ChartPoint;

/// Caption shown above the chart for a given model.
pub fn chart_title(model_name: &str) -> String {
    format!("Gold Rate Prediction vs USD/INR ({})", model_name)
}

/// Evenly spaced rates over `[(1 - span) * rate, (1 + span) * rate]`, both ends included.
pub fn range_inputs(rate: f64, span: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![rate],
        _ => {
            let start = rate * (1.0 - span);
            let end = rate * (1.0 + span);
            let step = (end - start) / (points - 1) as f64;
            let mut xs: Vec<f64> = (0..points).map(|i| start + step * i as f64).collect();
            // Last sample sits exactly on the upper bound
            if let Some(last) = xs.last_mut() {
                *last = end;
            }
            xs
        }
    }
}

/// Pairs inputs with predictions, in input order.
pub fn chart_series(xs: &[f64], ys: &[f64]) -> Vec<ChartPoint> {
    xs.iter()
        .zip(ys)
        .map(|(x, y)| ChartPoint { x: *x, y: *y })
        .collect()
}

fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min_value, max_value) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if (max_value - min_value).abs() < f64::EPSILON {
        // A single point (or a flat line) gets a default range around it
        (min_value - 1.0)..(max_value + 1.0)
    } else {
        min_value..max_value
    }
}

fn drawing_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}

/// Renders a chart series as an SVG document.
pub fn render_svg(series: &[ChartPoint], title: &str) -> Result<String, ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let mut svg = String::new();
    {
        let root_area = SVGBackend::with_string(&mut svg, (800, 600)).into_drawing_area();
        root_area.fill(&WHITE).map_err(drawing_error)?;

        let x_range = axis_range(series.iter().map(|p| p.x));
        let y_range = axis_range(series.iter().map(|p| p.y));

        let mut chart = ChartBuilder::on(&root_area)
            .caption(title, ("sans-serif", 28))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, y_range)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc("USD/INR")
            .y_desc("Predicted Gold Rate (INR)")
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(LineSeries::new(series.iter().map(|p| (p.x, p.y)), &RED))
            .map_err(drawing_error)?;
        chart
            .draw_series(series.iter().map(|p| Circle::new((p.x, p.y), 3, RED.filled())))
            .map_err(drawing_error)?;

        root_area.present().map_err(drawing_error)?;
    }

    Ok(svg)
}
