// src/types.rs
use eframe::egui::Vec2;

use crate::viewer::Recording;

// Events the GUI hands to the viewer controller, processed strictly in dispatch order.
#[derive(Clone, Debug)]
pub enum ViewerEvent {
    // New data set replaces the old one as a unit and resets the view
    DataLoaded(Recording),
    // Canvas sizes in pixels
    Resize { main: Vec2, minimap: Vec2 },
    // Pointer pressed on the viewport indicator (screen x)
    DragStart { x: f32 },
    DragMove { x: f32 },
    DragEnd,
    // Click on the minimap (x relative to its left edge)
    MinimapClick { x: f32 },
    // Keyboard scroll by a signed number of samples
    Pan(i64),
}

// Which surfaces need repainting after an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Redraw {
    pub main: bool,
    pub minimap: bool,
    pub indicator: bool,
}

impl Redraw {
    pub const NONE: Redraw = Redraw {
        main: false,
        minimap: false,
        indicator: false,
    };
    pub const VIEWPORT: Redraw = Redraw {
        main: true,
        minimap: false,
        indicator: true,
    };
    pub const ALL: Redraw = Redraw {
        main: true,
        minimap: true,
        indicator: true,
    };

    pub fn any(&self) -> bool {
        self.main || self.minimap || self.indicator
    }

    /// Surfaces needing a repaint after both `self` and `other`.
    pub fn merge(self, other: Redraw) -> Redraw {
        Redraw {
            main: self.main || other.main,
            minimap: self.minimap || other.minimap,
            indicator: self.indicator || other.indicator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_every_pending_surface() {
        assert_eq!(Redraw::NONE.merge(Redraw::VIEWPORT), Redraw::VIEWPORT);
        assert_eq!(Redraw::VIEWPORT.merge(Redraw::ALL), Redraw::ALL);
        assert!(!Redraw::VIEWPORT.merge(Redraw::NONE).minimap);
        assert!(!Redraw::NONE.merge(Redraw::NONE).any());
    }
}
