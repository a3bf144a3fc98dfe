//! Tile Layer
//!
//! Draws only the diagonal window of cells around the camera, sized from
//! the viewport in whole tiles, with a margin so partially visible tiles at
//! the edges are still drawn. Always behind everything else.

use std::rc::Rc;

use macroquad::math::Vec2;

use super::SceneContext;
use crate::game::{
    order, Binding, Component, ComponentError, Drawable, EntityHeader, Frame, Phase,
};
use crate::iso::DiagonalWindow;
use crate::map::MapError;
use crate::render::RasterSink;

pub struct MapLayer {
    drawable: Rc<MapDrawable>,
}

struct MapDrawable {
    ctx: Rc<SceneContext>,
}

impl MapLayer {
    /// Fails when the palette has no image for some tile id the grid can hold.
    pub fn new(ctx: Rc<SceneContext>) -> Result<Self, MapError> {
        let (delta, len) = (ctx.grid.delta(), ctx.palette.len());
        if len < delta as usize {
            return Err(MapError::PaletteTooShort { delta, len });
        }
        Ok(Self {
            drawable: Rc::new(MapDrawable { ctx }),
        })
    }

    /// Cells visible from the current camera position.
    pub fn visible_window(&self) -> DiagonalWindow {
        self.drawable.visible_window()
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

impl MapDrawable {
    fn visible_window(&self) -> DiagonalWindow {
        let ctx = &self.ctx;
        let cam = ctx.camera.position();
        let tiles = ctx.camera.viewport() / ctx.projection.tile_extent();
        let (cols, rows) = (tiles.x as i32, tiles.y as i32);

        let start_x = cam.x as i32 - cols / 2;
        let start_y = cam.y as i32 - (rows as f32 * 1.5) as i32;
        DiagonalWindow::new(start_x, start_y - 2, cols * 2, rows * 2 + 5)
    }
}

impl Drawable for MapDrawable {
    fn order_value(&self) -> i64 {
        order::ALWAYS_BEHIND
    }

    fn render_into(&self, sink: &mut dyn RasterSink) {
        let ctx = &self.ctx;
        let offset = ctx.draw_offset();

        for cell in self.visible_window() {
            let Some(id) = ctx.grid.get(cell.grid_x, cell.grid_y) else {
                continue;
            };
            let Some(image) = ctx.palette.image(id) else {
                continue;
            };
            let iso = Vec2::new(cell.grid_x as f32, cell.grid_y as f32);
            let at = ctx.projection.to_screen(iso);
            sink.blit(image, at + offset);
        }
    }
}

impl Component for MapLayer {
    const NAME: &'static str = "MapLayer";
    const BINDINGS: &'static [Binding<Self>] =
        &[Binding { phase: Phase::DRAW, name: "draw", handler: MapLayer::draw }];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{RenderQueue, World};
    use crate::iso::IsoProjection;
    use crate::map::{TileGrid, TilePalette};
    use crate::render::{builtin, ImageSource, ImageStore, RecordingSink};
    use crate::scene::testing::{context, StubInput};
    use crate::scene::CameraView;

    fn draw_map(ctx: &Rc<SceneContext>) -> RecordingSink {
        let mut world = World::new();
        world.spawn("map").unwrap().attach(MapLayer::new(ctx.clone()).unwrap()).unwrap();

        let input = StubInput::default();
        let mut queue = RenderQueue::new();
        let mut frame = Frame::new(0.0, &input, &mut queue);
        world.perform_calls(Phase::DRAW, &mut frame).unwrap();
        assert_eq!(queue.len(), 1);

        let mut sink = RecordingSink::new();
        queue.flush(&mut sink);
        sink
    }

    #[test]
    fn test_window_follows_camera() {
        let (ctx, _) = context(50, Vec2::new(25.0, 25.0));
        let layer = MapLayer::new(ctx.clone()).unwrap();

        // 1280x720 viewport over 64x32 tiles: 20 columns, 22 rows
        assert_eq!(layer.visible_window(), DiagonalWindow::new(15, -10, 40, 49));

        ctx.camera.set_position(Vec2::new(30.0, 40.0));
        assert_eq!(layer.visible_window(), DiagonalWindow::new(20, 5, 40, 49));
    }

    #[test]
    fn test_blits_only_cells_inside_grid() {
        let (ctx, _) = context(50, Vec2::new(0.0, 0.0));
        let sink = draw_map(&ctx);
        let blits = sink.blits();
        assert!(!blits.is_empty());

        let window = MapLayer::new(ctx.clone()).unwrap().visible_window();
        let inside = window.iter().filter(|c| ctx.grid.contains(c.grid_x, c.grid_y)).count();
        assert!(inside < window.len());
        assert_eq!(blits.len(), inside);
    }

    #[test]
    fn test_tile_images_match_grid_ids() {
        let (ctx, _) = context(50, Vec2::new(25.0, 25.0));
        let sink = draw_map(&ctx);
        let offset = ctx.draw_offset();

        let window = MapLayer::new(ctx.clone()).unwrap().visible_window();
        let expected: Vec<_> = window
            .iter()
            .filter_map(|c| {
                let id = ctx.grid.get(c.grid_x, c.grid_y)?;
                let iso = Vec2::new(c.grid_x as f32, c.grid_y as f32);
                let at = ctx.projection.to_screen(iso) + offset;
                Some((ctx.palette.image(id).unwrap(), at))
            })
            .collect();
        assert_eq!(sink.blits(), expected);
    }

    #[test]
    fn test_camera_tile_is_at_viewport_center() {
        let (ctx, _) = context(50, Vec2::new(25.0, 25.0));
        let sink = draw_map(&ctx);
        let id = ctx.grid.tile(25, 25);
        let image = ctx.palette.image(id).unwrap();
        assert!(sink.blits().contains(&(image, Vec2::new(640.0, 360.0))));
    }

    #[test]
    fn test_orders_behind_everything() {
        let (ctx, _) = context(5, Vec2::ZERO);
        let layer = MapLayer::new(ctx).unwrap();
        assert_eq!(layer.drawable.order_value(), order::ALWAYS_BEHIND);
    }

    #[test]
    fn test_short_palette_rejected() {
        let mut store = ImageStore::new(ImageSource::Builtin { tile_size: 64 });
        let base = store.load(builtin::TILE).unwrap();
        let grid = TileGrid::generate(10, 10, 20, 7).unwrap();
        let palette = TilePalette::build(&mut store, base, 12, 1.0);
        let ctx = Rc::new(SceneContext {
            projection: IsoProjection::new(64.0),
            grid,
            palette,
            camera: CameraView::new(Vec2::ZERO, Vec2::new(1280.0, 720.0)),
        });

        let err = MapLayer::new(ctx).err().unwrap();
        assert!(matches!(err, MapError::PaletteTooShort { delta: 20, len: 12 }));
    }
}
