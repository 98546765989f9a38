use std::io::Cursor;

use eframe::egui::{Color32, Pos2, Rect, Stroke, Vec2};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::{
    BitMapBackend, Circle, Color, DrawingArea, IntoDrawingArea, PathElement, RGBAColor, Rectangle,
    ShapeStyle, WHITE,
};

use crate::viewer::canvas::{Canvas, DrawList};
use crate::viewer::ViewerError;

/// Canvas over a plotters bitmap. The first drawing failure is kept and reported after replay.
struct BitmapCanvas<'a> {
    area: DrawingArea<BitMapBackend<'a>, Shift>,
    size: Vec2,
    failure: Option<ViewerError>,
}

impl BitmapCanvas<'_> {
    fn record<E>(&mut self, result: Result<(), DrawingAreaErrorKind<E>>)
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        if let Err(err) = result {
            self.failure.get_or_insert(err.into());
        }
    }
}

impl Canvas for BitmapCanvas<'_> {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        let result = self.area.fill(&WHITE);
        self.record(result);
    }

    fn stroke_path(&mut self, points: &[Pos2], stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        let style = ShapeStyle {
            color: rgba(stroke.color),
            filled: false,
            stroke_width: stroke.width.round().max(1.0) as u32,
        };
        let pixels: Vec<(i32, i32)> = points.iter().copied().map(to_pixel).collect();
        let result = self.area.draw(&PathElement::new(pixels, style));
        self.record(result);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let result = self.area.draw(&Rectangle::new(
            [to_pixel(rect.min), to_pixel(rect.max)],
            rgba(color).filled(),
        ));
        self.record(result);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        let result = self.area.draw(&Circle::new(
            to_pixel(center),
            radius.round() as i32,
            rgba(color).filled(),
        ));
        self.record(result);
    }
}

/// Rasterise a recorded frame and encode it as PNG.
pub fn render_png(list: &DrawList) -> Result<Vec<u8>, ViewerError> {
    let size = list.size();
    let width = size.x.round().max(1.0) as u32;
    let height = size.y.round().max(1.0) as u32;
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let area = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        area.fill(&WHITE)?;
        let mut canvas = BitmapCanvas {
            area,
            size,
            failure: None,
        };
        list.replay(&mut canvas);
        if let Some(err) = canvas.failure.take() {
            return Err(err);
        }
        canvas.area.present()?;
    }
    encode_png(&buffer, width, height)
}

fn to_pixel(point: Pos2) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

fn rgba(color: Color32) -> RGBAColor {
    RGBAColor(color.r(), color.g(), color.b(), f64::from(color.a()) / 255.0)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ViewerError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ViewerError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
