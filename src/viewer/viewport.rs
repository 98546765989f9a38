use std::ops::Range;

/// Visible window over the signal: a start offset and a fixed sample count.
///
/// The position always satisfies `0 <= position <= max(0, len - window_size)` for the
/// signal length it was last clamped against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    position: usize,
    window_size: usize,
}

impl Viewport {
    pub fn new(window_size: usize) -> Self {
        Self {
            position: 0,
            window_size: window_size.max(1),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn max_position(&self, signal_len: usize) -> usize {
        signal_len.saturating_sub(self.window_size)
    }

    pub fn clamp(&self, requested: i64, signal_len: usize) -> usize {
        let max = i64::try_from(self.max_position(signal_len)).unwrap_or(i64::MAX);
        // max >= 0, so the clamped value always fits
        requested.clamp(0, max) as usize
    }

    /// Move to `requested`, clamped into the valid range. Returns whether the position changed.
    pub fn set_position(&mut self, requested: i64, signal_len: usize) -> bool {
        let next = self.clamp(requested, signal_len);
        let changed = next != self.position;
        self.position = next;
        changed
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// `[start, end)` of the visible samples; the end is cut at the signal length.
    pub fn visible_range(&self, signal_len: usize) -> Range<usize> {
        let start = self.position.min(signal_len);
        let end = self.position.saturating_add(self.window_size).min(signal_len);
        start..end
    }
}
