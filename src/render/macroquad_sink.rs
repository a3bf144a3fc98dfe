//! Macroquad raster backend
//!
//! Blits go through a texture cache that uploads each `ImageStore` entry the
//! first time it is drawn.

use macroquad::prelude::*;

use super::images::{ImageHandle, ImageStore};
use super::rect::Rect as SinkRect;
use super::sink::RasterSink;

/// GPU textures for `ImageStore` entries, indexed like the store.
#[derive(Default)]
pub struct TextureCache {
    textures: Vec<Option<Texture2D>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn texture(&mut self, images: &ImageStore, handle: ImageHandle) -> &Texture2D {
        let idx = handle.index();
        if idx >= self.textures.len() {
            self.textures.resize_with(idx + 1, || None);
        }
        self.textures[idx].get_or_insert_with(|| {
            let pixels = images.get(handle);
            let (w, h) = (pixels.width() as u16, pixels.height() as u16);
            let texture = Texture2D::from_rgba8(w, h, pixels.as_raw());
            texture.set_filter(FilterMode::Nearest);
            texture
        })
    }
}

/// Raster sink drawing to the macroquad window.
pub struct MacroquadSink<'a> {
    images: &'a ImageStore,
    textures: &'a mut TextureCache,
}

impl<'a> MacroquadSink<'a> {
    pub fn new(images: &'a ImageStore, textures: &'a mut TextureCache) -> Self {
        Self { images, textures }
    }
}

impl RasterSink for MacroquadSink<'_> {
    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn blit(&mut self, image: ImageHandle, pos: Vec2) {
        let texture = self.textures.texture(self.images, image);
        draw_texture(texture, pos.x, pos.y, WHITE);
    }

    fn fill_rect(&mut self, rect: SinkRect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn stroke_rect(&mut self, rect: SinkRect, thickness: f32, color: Color) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        draw_line(from.x, from.y, to.x, to.y, thickness, color);
    }

    fn point(&mut self, at: Vec2, radius: f32, color: Color) {
        draw_circle(at.x, at.y, radius, color);
    }
}
