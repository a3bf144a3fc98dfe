//! Scene Configuration
//!
//! Stored as RON. Every field has a default, so a file only needs the
//! values it overrides:
//!
//! ```ron
//! (
//!     grid_width: 80,
//!     seed: Some(1234),
//!     fps_limit: Fps60,
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::FpsLimit;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "ISO_SCENE_CONFIG";
/// Used when `CONFIG_ENV` is unset
pub const DEFAULT_CONFIG_PATH: &str = "scene.ron";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Everything needed to build and run the default scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Grid size in tiles
    pub grid_width: u32,
    pub grid_height: u32,
    /// Screen width of one tile in pixels; tile images are `T x T/2`
    pub tile_size: f32,
    /// Number of distinct tile ids
    pub tile_delta: u32,
    /// Noise seed; drawn at random when absent
    pub seed: Option<u32>,
    /// Camera speed in screen pixels per second
    pub scroll_speed: f32,
    pub humanoid_count: u32,
    /// Minimap tile height in pixels (width is twice this)
    pub minimap_scale: f32,
    /// How far tile variants are blended toward their ramp color (0..=1)
    pub tint_strength: f32,
    /// Directory of `<name>.png` images; built-in images when absent
    pub asset_dir: Option<PathBuf>,
    pub fps_limit: FpsLimit,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            grid_width: 50,
            grid_height: 50,
            tile_size: 64.0,
            tile_delta: 20,
            seed: None,
            scroll_speed: 600.0,
            humanoid_count: 3,
            minimap_scale: 3.0,
            tint_strength: 1.0,
            asset_dir: None,
            fps_limit: FpsLimit::Unlocked,
        }
    }
}

impl SceneConfig {
    /// Path named by `ISO_SCENE_CONFIG`, else `scene.ron`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load from the default path.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_or_default(Self::default_path())
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load and validate `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty RON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        let ron_string = ron::ser::to_string_pretty(self, pretty)?;
        let path = path.as_ref();
        fs::write(path, ron_string).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.window_width == 0 || self.window_height == 0 {
            let (w, h) = (self.window_width, self.window_height);
            return invalid(format!("window size {w}x{h} is empty"));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid(format!("grid size {}x{} is empty", self.grid_width, self.grid_height));
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return invalid(format!("tile_size must be positive, got {}", self.tile_size));
        }
        if self.tile_size.fract() != 0.0 || self.tile_size as u32 % 2 != 0 {
            let size = self.tile_size;
            return invalid(format!("tile_size must be an even number of pixels, got {size}"));
        }
        if !(1..=256).contains(&self.tile_delta) {
            return invalid(format!("tile_delta must be in 1..=256, got {}", self.tile_delta));
        }
        if !(self.scroll_speed.is_finite() && self.scroll_speed > 0.0) {
            return invalid(format!("scroll_speed must be positive, got {}", self.scroll_speed));
        }
        if !(self.minimap_scale.is_finite() && self.minimap_scale > 0.0) {
            return invalid(format!("minimap_scale must be positive, got {}", self.minimap_scale));
        }
        if !(0.0..=1.0).contains(&self.tint_strength) {
            return invalid(format!("tint_strength must be in 0..=1, got {}", self.tint_strength));
        }
        Ok(())
    }
}
