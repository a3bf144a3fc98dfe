//! Raster Output
//!
//! The scene core renders through the `RasterSink` trait and refers to
//! images by `ImageHandle`. Everything macroquad-specific (texture upload,
//! draw calls) is confined to `macroquad_sink`.

pub mod builtin;
pub mod images;
pub mod macroquad_sink;
pub mod rect;
pub mod sink;

pub use images::{AssetError, ImageHandle, ImageSource, ImageStore};
pub use macroquad_sink::{MacroquadSink, TextureCache};
pub use rect::Rect;
pub use sink::RasterSink;

#[cfg(test)]
pub use sink::{DrawOp, RecordingSink};
