//! Raster Sink
//!
//! The boundary between the scene core and whatever actually puts pixels on
//! screen. Drawables only ever talk to `dyn RasterSink`; the macroquad
//! backend lives in `macroquad_sink`, and tests use `RecordingSink`.

use macroquad::color::Color;
use macroquad::math::Vec2;

use super::images::ImageHandle;
use super::rect::Rect;

/// Accepts blits and primitive shape draws. Every call is assumed to succeed.
pub trait RasterSink {
    /// Fill the whole target with `color`.
    fn clear(&mut self, color: Color);

    /// Draw `image` with its top-left corner at `pos`.
    fn blit(&mut self, image: ImageHandle, pos: Vec2);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline `rect` with lines `thickness` pixels wide.
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    fn point(&mut self, at: Vec2, radius: f32, color: Color);
}

/// One recorded raster call.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Blit { image: ImageHandle, pos: Vec2 },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, thickness: f32, color: Color },
    Line { from: Vec2, to: Vec2, thickness: f32, color: Color },
    Point { at: Vec2, radius: f32, color: Color },
}

/// Sink that records every call instead of drawing.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blits(&self) -> Vec<(ImageHandle, Vec2)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Blit { image, pos } => Some((*image, *pos)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl RasterSink for RecordingSink {
    fn clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn blit(&mut self, image: ImageHandle, pos: Vec2) {
        self.ops.push(DrawOp::Blit { image, pos });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.ops.push(DrawOp::StrokeRect { rect, thickness, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.ops.push(DrawOp::Line { from, to, thickness, color });
    }

    fn point(&mut self, at: Vec2, radius: f32, color: Color) {
        self.ops.push(DrawOp::Point { at, radius, color });
    }
}
