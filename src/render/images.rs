//! Image Store
//!
//! Hands out opaque `ImageHandle`s for logical resource names. Pixel data is
//! kept CPU-side as `image::RgbaImage` so palettes can be derived from it and
//! tests can run without a window; the macroquad sink uploads textures
//! lazily on first blit.
//!
//! Names resolve either against a directory (`<dir>/<name>.png`) or against
//! the built-in procedural images.

use std::collections::HashMap;
use std::path::PathBuf;

use image::RgbaImage;

use super::builtin;

/// Opaque reference to an image in an `ImageStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    index: u32,
    width: u32,
    height: u32,
}

impl ImageHandle {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Where named images come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Procedurally drawn placeholders sized for this tile size
    Builtin { tile_size: u32 },
    /// PNG files under a directory
    Directory(PathBuf),
}

/// Error type for image loading
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("no image named '{0}'")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Named, append-only collection of images.
pub struct ImageStore {
    source: ImageSource,
    images: Vec<RgbaImage>,
    by_name: HashMap<String, ImageHandle>,
}

impl ImageStore {
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            images: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Resolve `name` to a handle, loading it on first use.
    pub fn load(&mut self, name: &str) -> Result<ImageHandle, AssetError> {
        if let Some(handle) = self.by_name.get(name) {
            return Ok(*handle);
        }

        let image = match &self.source {
            ImageSource::Builtin { tile_size } => {
                builtin::generate(name, *tile_size)
                    .ok_or_else(|| AssetError::NotFound(name.to_string()))?
            }
            ImageSource::Directory(dir) => {
                let path = dir.join(format!("{name}.png"));
                let bytes = std::fs::read(&path).map_err(|source| match source.kind() {
                    std::io::ErrorKind::NotFound => AssetError::NotFound(name.to_string()),
                    _ => AssetError::Io { path: path.clone(), source },
                })?;
                image::load_from_memory(&bytes)
                    .map_err(|source| AssetError::Decode { path, source })?
                    .to_rgba8()
            }
        };

        log::debug!("loaded image '{}' ({}x{})", name, image.width(), image.height());
        Ok(self.insert(name, image))
    }

    /// Add an image under `name`, replacing any previous mapping for the name.
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) -> ImageHandle {
        let handle = ImageHandle {
            index: self.images.len() as u32,
            width: image.width(),
            height: image.height(),
        };
        self.images.push(image);
        self.by_name.insert(name.into(), handle);
        handle
    }

    /// Pixel data behind a handle.
    pub fn get(&self, handle: ImageHandle) -> &RgbaImage {
        &self.images[handle.index()]
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_builtin_load_is_cached() {
        let mut store = ImageStore::new(ImageSource::Builtin { tile_size: 64 });
        let a = store.load(builtin::TILE).unwrap();
        let b = store.load(builtin::TILE).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
        assert_eq!((a.width(), a.height()), (64, 32));
    }

    #[test]
    fn test_unknown_builtin() {
        let mut store = ImageStore::new(ImageSource::Builtin { tile_size: 64 });
        assert!(matches!(store.load("dragon"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255]));
        img.save(dir.path().join("tile_small.png")).unwrap();

        let mut store = ImageStore::new(ImageSource::Directory(dir.path().to_path_buf()));
        let handle = store.load("tile_small").unwrap();
        assert_eq!((handle.width(), handle.height()), (4, 2));
        assert_eq!(store.get(handle).get_pixel(3, 1), &Rgba([1, 2, 3, 255]));

        assert!(matches!(store.load("missing"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_directory_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
        let mut store = ImageStore::new(ImageSource::Directory(dir.path().to_path_buf()));
        assert!(matches!(store.load("broken"), Err(AssetError::Decode { .. })));
    }

    #[test]
    fn test_insert_hands_out_distinct_handles() {
        let mut store = ImageStore::new(ImageSource::Builtin { tile_size: 64 });
        let a = store.insert("a", RgbaImage::new(2, 2));
        let b = store.insert("b", RgbaImage::new(3, 1));
        assert_ne!(a, b);
        assert_eq!(store.get(b).width(), 3);
    }
}
