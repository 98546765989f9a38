use eframe::egui::{vec2, Rect, Vec2};

use crate::viewer::canvas::Canvas;
use crate::viewer::palette::ClassColorMap;
use crate::viewer::waveform::WindowProjection;

/// Marker geometry relative to the mapped peak position.
#[derive(Clone, Copy, Debug)]
pub struct MarkerStyle {
    /// Top-left corner of the true-class square.
    pub truth_offset: Vec2,
    pub truth_size: f32,
    /// Centre of the predicted-class dot.
    pub prediction_offset: Vec2,
    pub prediction_radius: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            truth_offset: vec2(-10.0, -30.0),
            truth_size: 10.0,
            prediction_offset: vec2(15.0, -25.0),
            prediction_radius: 6.0,
        }
    }
}

/// Label streams drawn on top of the peaks, positionally aligned with them.
#[derive(Clone, Copy, Debug)]
pub struct PeakLabels<'a> {
    pub truth: &'a [String],
    pub predicted: &'a [String],
}

/// Draw a true-class square and a predicted-class dot above every peak in the window.
/// Returns how many peaks were drawn.
pub fn render_overlay(
    canvas: &mut impl Canvas,
    projection: &WindowProjection,
    signal: &[f32],
    peaks: &[usize],
    labels: PeakLabels<'_>,
    palette: &ClassColorMap,
    style: &MarkerStyle,
) -> usize {
    // peaks are sorted, so the visible ones form a contiguous run
    let first = peaks.partition_point(|&peak| peak < projection.start);
    let mut drawn = 0;
    for (offset, &peak) in peaks[first..].iter().enumerate() {
        if !projection.contains(peak) {
            break;
        }
        let Some(&value) = signal.get(peak) else {
            continue;
        };
        let i = first + offset;
        let at = projection.project(peak, value);
        canvas.fill_rect(
            Rect::from_min_size(at + style.truth_offset, Vec2::splat(style.truth_size)),
            palette.color_at(labels.truth, i),
        );
        canvas.fill_circle(
            at + style.prediction_offset,
            style.prediction_radius,
            palette.color_at(labels.predicted, i),
        );
        drawn += 1;
    }
    drawn
}
