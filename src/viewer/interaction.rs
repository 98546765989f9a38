//! Pointer gestures on the minimap, turned into requested viewport positions.
//!
//! Requests are raw; the viewport does the clamping.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub start_x: f32,
    pub start_position: usize,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionHandler {
    drag: Option<DragState>,
}

impl InteractionHandler {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn press(&mut self, x: f32, current_position: usize) {
        self.drag = Some(DragState {
            start_x: x,
            start_position: current_position,
        });
    }

    /// Position requested by moving the pointer to `x` during a drag.
    ///
    /// The pixel delta is converted with the minimap scale (`minimap_width / signal_len`
    /// pixels per sample). `None` when no drag is active or there is nothing to scroll.
    pub fn drag_to(&self, x: f32, minimap_width: f32, signal_len: usize) -> Option<i64> {
        let drag = self.drag?;
        if signal_len == 0 || minimap_width <= 0.0 {
            return None;
        }
        let pixels_per_sample = f64::from(minimap_width) / signal_len as f64;
        let delta_samples = f64::from(x - drag.start_x) / pixels_per_sample;
        Some((drag.start_position as f64 + delta_samples).round() as i64)
    }

    pub fn release(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn cancel(&mut self) {
        self.drag = None;
    }

    /// Position that centres the window on the sample under a minimap click at `x`.
    /// Suppressed while a drag is in progress.
    pub fn click(
        &self,
        x: f32,
        minimap_width: f32,
        signal_len: usize,
        window_size: usize,
    ) -> Option<i64> {
        if self.is_dragging() || signal_len == 0 || minimap_width <= 0.0 {
            return None;
        }
        let sample = f64::from(x) / f64::from(minimap_width) * signal_len as f64;
        Some((sample - window_size as f64 / 2.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_centres_the_window_on_the_sample() {
        let handler = InteractionHandler::default();
        assert_eq!(handler.click(800.0, 1000.0, 10_000, 3000), Some(6500));
        assert_eq!(handler.click(0.0, 1000.0, 10_000, 3000), Some(-1500));
    }

    #[test]
    fn click_is_ignored_while_dragging() {
        let mut handler = InteractionHandler::default();
        handler.press(10.0, 0);
        assert_eq!(handler.click(800.0, 1000.0, 10_000, 3000), None);
        handler.release();
        assert!(handler.click(800.0, 1000.0, 10_000, 3000).is_some());
    }

    #[test]
    fn drag_converts_pixels_to_samples() {
        let mut handler = InteractionHandler::default();
        handler.press(650.0, 6500);
        // 1000 px for 10 000 samples: 5 px back is 50 samples
        assert_eq!(handler.drag_to(645.0, 1000.0, 10_000), Some(6450));
        assert_eq!(handler.drag_to(700.0, 1000.0, 10_000), Some(7000));
    }

    #[test]
    fn move_without_press_does_nothing() {
        let handler = InteractionHandler::default();
        assert_eq!(handler.drag_to(100.0, 1000.0, 10_000), None);
    }

    #[test]
    fn move_before_data_loads_is_a_no_op() {
        let mut handler = InteractionHandler::default();
        handler.press(100.0, 0);
        assert_eq!(handler.drag_to(150.0, 1000.0, 0), None);
        assert!(handler.release());
        assert!(!handler.release());
    }
}
