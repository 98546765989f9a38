use eframe::egui::{pos2, Color32, Pos2, Stroke};

use crate::viewer::canvas::Canvas;
use crate::viewer::mapper::{map_y, ValueRange, VALUE_MARGIN};

#[derive(Clone, Copy, Debug)]
pub struct MinimapStyle {
    pub line: Stroke,
    pub peak_color: Color32,
    pub peak_radius: f32,
}

impl Default for MinimapStyle {
    fn default() -> Self {
        Self {
            line: Stroke::new(1.0, Color32::from_rgb(0xaa, 0xaa, 0xaa)),
            peak_color: Color32::RED,
            peak_radius: 2.0,
        }
    }
}

/// Sampling stride that keeps at most one sample per pixel column.
pub fn stride_for(len: usize, width_px: usize) -> usize {
    len.div_ceil(width_px.max(1)).max(1)
}

pub fn downsample(signal: &[f32], width_px: usize) -> Vec<f32> {
    signal
        .iter()
        .step_by(stride_for(signal.len(), width_px))
        .copied()
        .collect()
}

/// Paint the whole signal across the canvas width, plus a dot per peak when given.
pub fn render_minimap(
    canvas: &mut impl Canvas,
    signal: &[f32],
    peaks: Option<&[usize]>,
    style: &MinimapStyle,
) {
    if signal.is_empty() {
        return;
    }
    let size = canvas.size();
    let reduced = downsample(signal, size.x.max(0.0) as usize);
    let Some(range) = ValueRange::of_samples(&reduced, VALUE_MARGIN) else {
        return;
    };
    canvas.clear();

    let count = reduced.len() as f32;
    let points: Vec<Pos2> = reduced
        .iter()
        .enumerate()
        .map(|(i, &value)| pos2(i as f32 / count * size.x, map_y(value, range, size.y)))
        .collect();
    canvas.stroke_path(&points, style.line);

    let len = signal.len() as f32;
    for &peak in peaks.unwrap_or_default() {
        let Some(&value) = signal.get(peak) else {
            continue;
        };
        let center = pos2(peak as f32 / len * size.x, map_y(value, range, size.y));
        canvas.fill_circle(center, style.peak_radius, style.peak_color);
    }
}
