//! Procedural Tile Map
//!
//! - `TileGrid`: fixed-size grid of tile ids in `[0, delta)`, generated once
//!   from seeded OpenSimplex noise and immutable afterwards
//! - `palette`: the color ramp and tinted tile variants indexed by tile id

pub mod grid;
pub mod palette;

pub use grid::TileGrid;
pub use palette::TilePalette;

/// Errors raised while building the tile map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("tile delta must be in 1..=256, got {0}")]
    InvalidDelta(u32),

    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("palette has {len} tile variants, grid ids need {delta}")]
    PaletteTooShort { delta: u32, len: usize },

    #[error("base tile image is {actual_w}x{actual_h}, expected {expected_w}x{expected_h}")]
    TileSizeMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },
}
