//! Sample-space to pixel-space mapping shared by every renderer.
//!
//! Values occupy the middle 80% of the canvas height (10% margin above and below) and
//! are inverted so larger values draw higher. Horizontally the visible window is
//! stretched across the full canvas width.

/// Padding added above the maximum and below the minimum of a visible slice.
pub const VALUE_MARGIN: f32 = 0.2;
/// Fraction of the canvas height used by the value band.
pub const BAND_FRACTION: f32 = 0.8;
/// Fraction of the canvas height left empty at the top and at the bottom.
pub const EDGE_FRACTION: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Min/max of `samples` widened by `margin` on both sides. `None` for an empty slice.
    pub fn of_samples(samples: &[f32], margin: f32) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let (min, max) = samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Some(Self::new(min - margin, max + margin))
    }

    /// Height of the range; a zero (or non-finite) span is replaced by 1.
    pub fn span(&self) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() {
            1.0
        } else {
            span
        }
    }
}

pub fn map_y(value: f32, range: ValueRange, height: f32) -> f32 {
    height - (value - range.min) / range.span() * (height * BAND_FRACTION) - height * EDGE_FRACTION
}

pub fn map_x(relative_index: f32, sample_count: usize, width: f32) -> f32 {
    if sample_count == 0 {
        return 0.0;
    }
    relative_index * (width / sample_count as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn extremes_land_on_band_edges() {
        for (min, max, height) in [(-1.0, 1.0, 300.0), (0.2, 0.7, 120.0), (-50.0, 900.0, 61.0)] {
            let range = ValueRange::new(min, max);
            assert!(close(map_y(min, range, height), height * 0.9));
            assert!(close(map_y(max, range, height), height * 0.1));
        }
    }

    #[test]
    fn higher_values_draw_higher() {
        let range = ValueRange::new(0.0, 10.0);
        assert!(map_y(7.0, range, 200.0) < map_y(3.0, range, 200.0));
    }

    #[test]
    fn degenerate_range_defaults_to_unit_span() {
        let range = ValueRange::of_samples(&[0.5, 0.5, 0.5], 0.0).unwrap();
        assert_eq!(range.span(), 1.0);
        assert!(close(map_y(0.5, range, 100.0), 90.0));
    }

    #[test]
    fn slice_range_is_padded() {
        let range = ValueRange::of_samples(&[-1.0, 0.0, 2.0], VALUE_MARGIN).unwrap();
        assert!(close(range.min, -1.2));
        assert!(close(range.max, 2.2));
        assert!(ValueRange::of_samples(&[], VALUE_MARGIN).is_none());
    }

    #[test]
    fn x_scales_by_window_width() {
        assert!(close(map_x(0.0, 3000, 900.0), 0.0));
        assert!(close(map_x(1500.0, 3000, 900.0), 450.0));
        assert_eq!(map_x(4.0, 0, 900.0), 0.0);
    }
}
