use eframe::egui::{Color32, Pos2, Rect, Stroke, Vec2};

/// Drawing surface the renderers paint on. Coordinates are canvas-local pixels with the
/// origin at the top-left corner.
pub trait Canvas {
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn stroke_path(&mut self, points: &[Pos2], stroke: Stroke);
    fn fill_rect(&mut self, rect: Rect, color: Color32);
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Path { points: Vec<Pos2>, stroke: Stroke },
    Rect { rect: Rect, color: Color32 },
    Circle { center: Pos2, radius: f32, color: Color32 },
}

/// Canvas that records draw operations instead of painting them.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    size: Vec2,
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// Paint the recorded operations onto another canvas, in order.
    pub fn replay(&self, canvas: &mut impl Canvas) {
        for op in &self.ops {
            match op {
                DrawOp::Clear => canvas.clear(),
                DrawOp::Path { points, stroke } => canvas.stroke_path(points, *stroke),
                DrawOp::Rect { rect, color } => canvas.fill_rect(*rect, *color),
                DrawOp::Circle {
                    center,
                    radius,
                    color,
                } => canvas.fill_circle(*center, *radius, *color),
            }
        }
    }
}

#[cfg(test)]
impl DrawList {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = (&[Pos2], Stroke)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Path { points, stroke } => Some((points.as_slice(), *stroke)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (Rect, Color32)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Pos2, f32, Color32)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Circle {
                center,
                radius,
                color,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    // Earlier operations are invisible after a clear, so they are dropped.
    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn stroke_path(&mut self, points: &[Pos2], stroke: Stroke) {
        self.ops.push(DrawOp::Path {
            points: points.to_vec(),
            stroke,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.ops.push(DrawOp::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn clear_discards_previous_operations() {
        let mut list = DrawList::new(vec2(10.0, 10.0));
        list.fill_circle(pos2(1.0, 1.0), 2.0, Color32::RED);
        list.clear();
        list.fill_rect(Rect::from_min_size(pos2(0.0, 0.0), vec2(2.0, 2.0)), Color32::BLUE);
        assert_eq!(list.ops().len(), 2);
        assert_eq!(list.ops()[0], DrawOp::Clear);
        assert_eq!(list.circles().count(), 0);
        assert_eq!(list.rects().count(), 1);
    }

    #[test]
    fn replay_reproduces_the_recording() {
        let mut source = DrawList::new(vec2(20.0, 20.0));
        source.clear();
        source.stroke_path(&[pos2(0.0, 0.0), pos2(5.0, 5.0)], Stroke::new(1.0, Color32::GRAY));
        source.fill_circle(pos2(3.0, 3.0), 1.0, Color32::GREEN);
        let mut copy = DrawList::new(vec2(20.0, 20.0));
        source.replay(&mut copy);
        assert_eq!(source, copy);
    }
}
