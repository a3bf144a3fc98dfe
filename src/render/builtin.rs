//! Built-in placeholder images, drawn at startup when no asset directory is
//! configured.

use image::{Rgba, RgbaImage};

/// Base tile, `T x T/2` diamond
pub const TILE: &str = "tile_medium";
/// Character sprite, feet at 7/8 of its height
pub const HUMANOID: &str = "humanoid_medium";

/// Generate the built-in image called `name`, if there is one.
pub fn generate(name: &str, tile_size: u32) -> Option<RgbaImage> {
    match name {
        TILE => Some(diamond_tile(tile_size)),
        HUMANOID => Some(humanoid(tile_size)),
        _ => None,
    }
}

/// Light gray diamond filling a `T x T/2` image, with a darker rim.
pub fn diamond_tile(tile_size: u32) -> RgbaImage {
    let w = tile_size.max(2);
    let h = (w / 2).max(1);
    let (hw, hh) = (w as f32 / 2.0, h as f32 / 2.0);

    RgbaImage::from_fn(w, h, |x, y| {
        let dx = ((x as f32 + 0.5) - hw).abs() / hw;
        let dy = ((y as f32 + 0.5) - hh).abs() / hh;
        let d = dx + dy;
        if d > 1.0 {
            Rgba([0, 0, 0, 0])
        } else if d > 0.9 {
            Rgba([170, 170, 170, 255])
        } else {
            Rgba([220, 220, 220, 255])
        }
    })
}

/// Simple head-and-body figure, `T/4 x T/2`.
pub fn humanoid(tile_size: u32) -> RgbaImage {
    let w = (tile_size / 4).max(4);
    let h = (tile_size / 2).max(8);
    let (wf, hf) = (w as f32, h as f32);

    let head_center = (wf / 2.0, hf * 0.18);
    let head_radius = wf * 0.3;
    let body_top = hf * 0.32;
    let body_bottom = hf * 0.875;
    let body_half = wf * 0.3;

    RgbaImage::from_fn(w, h, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let head_dist = ((px - head_center.0).powi(2) + (py - head_center.1).powi(2)).sqrt();
        if head_dist <= head_radius {
            Rgba([230, 190, 150, 255])
        } else if py >= body_top && py <= body_bottom && (px - wf / 2.0).abs() <= body_half {
            Rgba([60, 90, 180, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
