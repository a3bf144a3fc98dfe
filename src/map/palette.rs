//! Tile Palette
//!
//! `delta` variants of the base tile, one per tile id. Variant `i` is the
//! base image blended toward a green ramp color, so higher ids read as
//! brighter tiles both on the map and on the minimap.

use image::RgbaImage;
use macroquad::color::Color;

use crate::render::{ImageHandle, ImageStore};

/// Ramp color for tile id `i` of `delta`. Monotonic in `i`.
pub fn ramp_color(i: u32, delta: u32) -> [u8; 3] {
    let delta = delta.max(1);
    let channel = |v: u32| ((v * 255) / delta).min(255) as u8;
    [0, channel(i), channel(i.saturating_sub(50))]
}

/// Blend every pixel's RGB toward `color` by `strength` (0 = untouched,
/// 1 = flat `color`). Alpha is preserved.
pub fn blend(base: &RgbaImage, color: [u8; 3], strength: f32) -> RgbaImage {
    let t = strength.clamp(0.0, 1.0);
    let mut out = base.clone();
    for pixel in out.pixels_mut() {
        for c in 0..3 {
            let from = f32::from(pixel[c]);
            let to = f32::from(color[c]);
            pixel[c] = (from + (to - from) * t).round() as u8;
        }
    }
    out
}

/// Tinted tile images plus their flat colors, indexed by tile id.
#[derive(Debug, Clone)]
pub struct TilePalette {
    images: Vec<ImageHandle>,
    colors: Vec<Color>,
}

impl TilePalette {
    /// Derive `delta` variants from `base`, registering each in `store`.
    pub fn build(store: &mut ImageStore, base: ImageHandle, delta: u32, strength: f32) -> Self {
        let mut images = Vec::with_capacity(delta as usize);
        let mut colors = Vec::with_capacity(delta as usize);

        for i in 0..delta {
            let rgb = ramp_color(i, delta);
            let tinted = blend(store.get(base), rgb, strength);
            images.push(store.insert(format!("tile-variant-{i}"), tinted));
            colors.push(Color::from_rgba(rgb[0], rgb[1], rgb[2], 255));
        }

        Self { images, colors }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn image(&self, id: u8) -> Option<ImageHandle> {
        self.images.get(usize::from(id)).copied()
    }

    pub fn color(&self, id: u8) -> Option<Color> {
        self.colors.get(usize::from(id)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{builtin, ImageSource};
    use image::Rgba;

    #[test]
    fn test_ramp_is_monotonic() {
        let delta = 20;
        let mut prev = ramp_color(0, delta);
        assert_eq!(prev, [0, 0, 0]);
        for i in 1..delta {
            let next = ramp_color(i, delta);
            assert!(next[1] > prev[1]);
            assert!(next[2] >= prev[2]);
            prev = next;
        }
    }

    #[test]
    fn test_ramp_blue_channel_for_large_palettes() {
        assert_eq!(ramp_color(50, 100)[2], 0);
        assert_eq!(ramp_color(60, 100)[2], 25);
        assert_eq!(ramp_color(99, 100), [0, 252, 124]);
    }

    #[test]
    fn test_blend_keeps_alpha() {
        let mut base = RgbaImage::from_pixel(2, 1, Rgba([200, 100, 50, 255]));
        base.put_pixel(1, 0, Rgba([200, 100, 50, 0]));

        let flat = blend(&base, [0, 40, 0], 1.0);
        assert_eq!(flat.get_pixel(0, 0), &Rgba([0, 40, 0, 255]));
        assert_eq!(flat.get_pixel(1, 0)[3], 0);

        let half = blend(&base, [0, 40, 0], 0.5);
        assert_eq!(half.get_pixel(0, 0), &Rgba([100, 70, 25, 255]));

        let none = blend(&base, [0, 40, 0], 0.0);
        assert_eq!(none.get_pixel(0, 0), base.get_pixel(0, 0));
    }

    #[test]
    fn test_palette_one_variant_per_id() {
        let mut store = ImageStore::new(ImageSource::Builtin { tile_size: 64 });
        let base = store.load(builtin::TILE).unwrap();
        let palette = TilePalette::build(&mut store, base, 20, 1.0);

        assert_eq!(palette.len(), 20);
        assert_eq!(store.len(), 21);
        for id in 0..20u8 {
            let handle = palette.image(id).unwrap();
            assert_eq!((handle.width(), handle.height()), (64, 32));
        }
        assert_eq!(palette.image(20), None);
        assert_eq!(palette.color(19), Some(Color::from_rgba(0, 242, 0, 255)));
    }
}
