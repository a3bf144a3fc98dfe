//! Isometric <-> Cartesian Projection
//!
//! Iso space is the logical grid (one unit per tile). Screen space is the
//! projected 2D space handed to the raster sink. With tile size `T`:
//!
//! ```text
//! to_screen(v) = ((v.x + v.y) / 2, (v.y - v.x) / 4) * T
//! to_grid(v)   = (v.x - 2 * v.y, v.x + 2 * v.y) / T
//! ```
//!
//! The two are exact inverses (up to float rounding) for every input.

use macroquad::math::Vec2;

/// Projection between iso grid coordinates and screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoProjection {
    /// Screen width in pixels of one 1x1 iso tile (its image is `T x T/2`)
    tile_size: f32,
}

impl IsoProjection {
    pub const fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Screen size of one tile image: `(T, T/2)`.
    pub fn tile_extent(&self) -> Vec2 {
        Vec2::new(self.tile_size, self.tile_size / 2.0)
    }

    /// Iso grid -> screen.
    pub fn to_screen(&self, v: Vec2) -> Vec2 {
        Vec2::new((v.x + v.y) / 2.0, (v.y - v.x) / 4.0) * self.tile_size
    }

    /// Screen -> iso grid.
    pub fn to_grid(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x - 2.0 * v.y, v.x + 2.0 * v.y) / self.tile_size
    }
}
