//! Minimap
//!
//! The whole grid projected at a small tile size into the bottom-right
//! corner of the viewport, one filled rectangle per cell in its ramp color,
//! plus an outline of what the camera currently shows.

use std::rc::Rc;

use macroquad::color::Color;
use macroquad::math::Vec2;

use super::SceneContext;
use crate::game::{order, Binding, Component, ComponentError, Drawable, EntityHeader, Frame, Phase};
use crate::iso::IsoProjection;
use crate::render::{RasterSink, Rect};

/// Outline color of the camera viewport indicator
pub const CAMERA_COLOR: Color = Color::new(218.0 / 255.0, 224.0 / 255.0, 44.0 / 255.0, 1.0);
const CAMERA_LINE: f32 = 2.0;

pub struct Minimap {
    drawable: Rc<MinimapDrawable>,
}

struct MinimapDrawable {
    ctx: Rc<SceneContext>,
    /// Map projection at minimap tile size
    projection: IsoProjection,
    /// Screen region the minimap occupies
    region: Rect,
    /// Screen position of grid cell (0, 0)
    origin: Vec2,
}

impl Minimap {
    /// A minimap whose tiles are `2*scale x scale` pixels.
    pub fn new(ctx: Rc<SceneContext>, scale: f32) -> Self {
        let projection = IsoProjection::new(2.0 * scale);
        let tile = projection.tile_extent();
        let (w, h) = (ctx.grid.width() as f32, ctx.grid.height() as f32);

        // Cell (w-1, 0) is the topmost, (0, h-1) the bottommost
        let diagonal = w + h - 2.0;
        let size = Vec2::new(tile.x / 2.0 * diagonal + tile.x, tile.y / 2.0 * diagonal + tile.y);
        let region = Rect::from_pos_size(ctx.camera.viewport() - size, size);
        let origin = region.pos() + Vec2::new(0.0, tile.y / 2.0 * (w - 1.0));

        Self {
            drawable: Rc::new(MinimapDrawable { ctx, projection, region, origin }),
        }
    }

    pub fn region(&self) -> Rect {
        self.drawable.region
    }

    /// Where the camera indicator is drawn this frame.
    pub fn camera_rect(&self) -> Rect {
        self.drawable.camera_rect()
    }

    fn draw(
        &mut self,
        _entity: &mut EntityHeader,
        frame: &mut Frame<'_>,
    ) -> Result<(), ComponentError> {
        frame.queue.enqueue(self.drawable.clone());
        Ok(())
    }
}

impl MinimapDrawable {
    fn to_mini(&self, iso: Vec2) -> Vec2 {
        self.origin + self.projection.to_screen(iso)
    }

    /// Main-map tile size to minimap tile size
    fn scale_ratio(&self) -> f32 {
        self.projection.tile_size() / self.ctx.projection.tile_size()
    }

    fn camera_rect(&self) -> Rect {
        let center = self.to_mini(self.ctx.camera.position());
        Rect::centered(center, self.ctx.camera.viewport() * self.scale_ratio())
    }
}

impl Drawable for MinimapDrawable {
    fn order_value(&self) -> i64 {
        order::OVERLAY
    }

    fn render_into(&self, sink: &mut dyn RasterSink) {
        let tile = self.projection.tile_extent();
        for (x, y, id) in self.ctx.grid.cells() {
            let Some(color) = self.ctx.palette.color(id) else {
                continue;
            };
            let at = self.to_mini(Vec2::new(x as f32, y as f32));
            sink.fill_rect(Rect::from_pos_size(at, tile), color);
        }

        sink.stroke_rect(self.camera_rect(), CAMERA_LINE, CAMERA_COLOR);
    }
}

impl Component for Minimap {
    const NAME: &'static str = "Minimap";
    const BINDINGS: &'static [Binding<Self>] =
        &[Binding { phase: Phase::DRAW, name: "draw", handler: Minimap::draw }];
}
