//! Scene Components
//!
//! The concrete behavior units of the isometric scene and the code that
//! assembles the default scene:
//! - `Camera`: integrates input into iso movement, clamps to the grid
//! - `MapLayer`: windowed tile layer, always behind
//! - `Minimap`: whole grid at a small scale plus the camera's viewport
//! - `Humanoid`: anchored sprite ordered by distance to the screen bottom
//! - `SelectionBox`: left-drag rectangle, always on top
//!
//! Components never reach for globals. Everything they share is handed to
//! them at construction through an `Rc<SceneContext>`.

mod builder;
mod camera;
mod humanoid;
mod map_layer;
mod minimap;
mod selection;

pub use builder::{build_default_scene, SceneError};
pub use camera::Camera;
pub use humanoid::Humanoid;
pub use map_layer::MapLayer;
pub use minimap::Minimap;
pub use selection::SelectionBox;

use std::cell::Cell;

use macroquad::math::Vec2;

use crate::iso::IsoProjection;
use crate::map::{TileGrid, TilePalette};

/// Camera state readable by every drawable.
///
/// Written only by the `Camera` component during the update phase, read
/// during the draw phase.
#[derive(Debug)]
pub struct CameraView {
    position: Cell<Vec2>,
    viewport: Vec2,
}

impl CameraView {
    pub fn new(position: Vec2, viewport: Vec2) -> Self {
        Self {
            position: Cell::new(position),
            viewport,
        }
    }

    /// Iso-space position
    pub fn position(&self) -> Vec2 {
        self.position.get()
    }

    pub fn set_position(&self, position: Vec2) {
        self.position.set(position);
    }

    /// Viewport size in screen pixels
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}

/// Shared, read-mostly state injected into scene components.
#[derive(Debug)]
pub struct SceneContext {
    pub projection: IsoProjection,
    pub grid: TileGrid,
    pub palette: TilePalette,
    pub camera: CameraView,
}

impl SceneContext {
    /// Offset added to every screen projection so the camera position lands
    /// on the viewport center.
    pub fn draw_offset(&self) -> Vec2 {
        -self.projection.to_screen(self.camera.position()) + self.camera.viewport() / 2.0
    }

    /// Grid extent in iso units: `(width, height)`.
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.grid.width() as f32, self.grid.height() as f32)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_maps_to_viewport_center() {
        let (ctx, _) = testing::context(50, Vec2::new(25.0, 25.0));
        let on_screen = ctx.projection.to_screen(ctx.camera.position()) + ctx.draw_offset();
        assert!((on_screen - Vec2::new(640.0, 360.0)).length() < 1e-3);
        assert_eq!(ctx.bounds(), Vec2::new(50.0, 50.0));
    }
}
