//! Tile Grid Generation
//!
//! Each cell gets
//!
//! ```text
//! tile_id = floor(((noise2d(x / delta, y / delta) + 1) / 2) * delta)
//! ```
//!
//! where `noise2d` is OpenSimplex seeded once at construction. Noise output
//! nominally spans [-1, 1]; the result is clamped so ids always land in
//! `[0, delta)` even when the generator overshoots by a hair.

use noise::{NoiseFn, OpenSimplex};

use super::MapError;

/// Seeded 2D noise source that maps grid cells to tile ids.
pub struct TileNoise {
    simplex: OpenSimplex,
}

impl TileNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: OpenSimplex::new(seed),
        }
    }

    /// Tile id for cell `(x, y)` with a palette of `delta` variants.
    pub fn tile_id(&self, x: i64, y: i64, delta: u32) -> u8 {
        let d = f64::from(delta);
        let n = self.simplex.get([x as f64 / d, y as f64 / d]);
        let id = (((n + 1.0) / 2.0) * d).floor();
        id.clamp(0.0, d - 1.0) as u8
    }
}

/// Fixed-size grid of tile ids.
///
/// Stored row-major; `tile(x, y)` addresses column `x` of row `y`.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    delta: u32,
    seed: u32,
    tiles: Vec<u8>,
}

impl TileGrid {
    /// Generate a `width x height` grid from `seed`.
    pub fn generate(width: u32, height: u32, delta: u32, seed: u32) -> Result<Self, MapError> {
        if delta == 0 || delta > 256 {
            return Err(MapError::InvalidDelta(delta));
        }
        if width == 0 || height == 0 {
            return Err(MapError::EmptyGrid { width, height });
        }

        let noise = TileNoise::new(seed);
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(noise.tile_id(i64::from(x), i64::from(y), delta));
            }
        }

        Ok(Self { width, height, delta, seed, tiles })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn delta(&self) -> u32 {
        self.delta
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Whether `(x, y)` addresses a cell of this grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Tile id at `(x, y)`.
    ///
    /// Panics when out of range; callers guard with `contains` (the visible
    /// window traversal does not bounds-check).
    pub fn tile(&self, x: u32, y: u32) -> u8 {
        assert!(
            x < self.width && y < self.height,
            "tile ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.tiles[(y * self.width + x) as usize]
    }

    /// Checked lookup with signed coordinates.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.contains(x, y).then(|| self.tile(x as u32, y as u32))
    }

    /// All cells as `(x, y, id)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        let w = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &id)| (i as u32 % w, i as u32 / w, id))
    }
}
