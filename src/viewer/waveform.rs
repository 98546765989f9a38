use eframe::egui::{pos2, Color32, Pos2, Stroke, Vec2};

use crate::viewer::canvas::Canvas;
use crate::viewer::mapper::{map_x, map_y, ValueRange, VALUE_MARGIN};

pub const GRID_ROWS: usize = 10;
pub const GRID_COLUMNS: usize = 20;

#[derive(Clone, Copy, Debug)]
pub struct WaveformStyle {
    pub line: Stroke,
    pub grid: Stroke,
}

impl Default for WaveformStyle {
    fn default() -> Self {
        Self {
            line: Stroke::new(2.0, Color32::from_rgb(0x00, 0x7b, 0xff)),
            grid: Stroke::new(0.5, Color32::from_rgb(0xe0, 0xe0, 0xe0)),
        }
    }
}

/// Coordinate frame of one main-view render: the visible `[start, end)` slice, its padded
/// value range and the canvas size. The waveform and the peak overlay share it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowProjection {
    pub start: usize,
    pub end: usize,
    pub range: ValueRange,
    pub size: Vec2,
}

impl WindowProjection {
    /// `end` is clamped to the signal length. `None` when nothing is visible.
    pub fn compute(signal: &[f32], start: usize, end: usize, size: Vec2) -> Option<Self> {
        let end = end.min(signal.len());
        if start >= end {
            return None;
        }
        let range = ValueRange::of_samples(&signal[start..end], VALUE_MARGIN)?;
        Some(Self {
            start,
            end,
            range,
            size,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }

    pub fn project(&self, index: usize, value: f32) -> Pos2 {
        let relative = index as f32 - self.start as f32;
        pos2(
            map_x(relative, self.sample_count(), self.size.x),
            map_y(value, self.range, self.size.y),
        )
    }
}

pub fn draw_grid(canvas: &mut impl Canvas, stroke: Stroke) {
    let size = canvas.size();
    let row_step = size.y / GRID_ROWS as f32;
    for row in 0..GRID_ROWS {
        let y = row as f32 * row_step;
        canvas.stroke_path(&[pos2(0.0, y), pos2(size.x, y)], stroke);
    }
    let column_step = size.x / GRID_COLUMNS as f32;
    for column in 0..GRID_COLUMNS {
        let x = column as f32 * column_step;
        canvas.stroke_path(&[pos2(x, 0.0), pos2(x, size.y)], stroke);
    }
}

/// Paint the grid and the visible slice of `signal` as one polyline.
///
/// An empty signal leaves the canvas untouched. Returns the projection used so overlays
/// can be placed in the same frame.
pub fn render_waveform(
    canvas: &mut impl Canvas,
    signal: &[f32],
    start: usize,
    end: usize,
    style: &WaveformStyle,
) -> Option<WindowProjection> {
    if signal.is_empty() {
        return None;
    }
    canvas.clear();
    draw_grid(canvas, style.grid);
    let projection = WindowProjection::compute(signal, start, end, canvas.size())?;
    let points: Vec<Pos2> = signal[projection.start..projection.end]
        .iter()
        .enumerate()
        .map(|(i, &value)| projection.project(projection.start + i, value))
        .collect();
    canvas.stroke_path(&points, style.line);
    Some(projection)
}
