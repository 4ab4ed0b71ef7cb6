use std::f64::consts::{FRAC_PI_2, TAU};

use crate::models::settings::ChartConfig;
use crate::models::stats::{LabelPoint, PieLabels};

fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Start and end angle in radians of every segment, walking clockwise from
/// 12 o'clock. Empty when the values sum to zero.
pub fn segment_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total = total(values);
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = -FRAC_PI_2;
    values
        .iter()
        .map(|value| {
            let end = start + (value / total) * TAU;
            let angles = (start, end);
            start = end;
            angles
        })
        .collect()
}

pub fn point_on_circle(angle: f64, radius: f64, center: (f64, f64)) -> LabelPoint {
    LabelPoint {
        x: radius.mul_add(angle.cos(), center.0),
        y: radius.mul_add(angle.sin(), center.1),
    }
}

/// Label anchors at each segment's angular midpoint, `label_radius` from the
/// centre of a `width` × `height` chart.
pub fn layout_labels(
    values: &[f64],
    width: f64,
    height: f64,
    label_radius: f64,
) -> Vec<LabelPoint> {
    let center = (width / 2.0, height / 2.0);
    segment_angles(values)
        .into_iter()
        .map(|(start, end)| point_on_circle((start + end) / 2.0, label_radius, center))
        .collect()
}

pub fn percentages(values: &[f64]) -> Vec<f64> {
    let total = total(values);
    if total <= 0.0 {
        return Vec::new();
    }
    values.iter().map(|value| value / total * 100.0).collect()
}

/// Outer grade labels plus the inner ring used for the selected segment's
/// percentage callout. `None` for an all-zero dataset.
pub fn layout_pie(values: &[f64], chart: &ChartConfig) -> Option<PieLabels> {
    if total(values) <= 0.0 {
        return None;
    }

    Some(PieLabels {
        outer: layout_labels(values, chart.width, chart.height, chart.label_radius),
        inner: layout_labels(values, chart.width, chart.height, chart.inner_label_radius),
        percentages: percentages(values),
    })
}
