//! Isometric scene engine
//!
//! - `iso`: grid <-> screen projection and the visible-window traversal
//! - `map`: seeded procedural tile grid and its tinted palette
//! - `game`: entities, phase dispatch, render queue and the frame step
//! - `scene`: camera, map, minimap, humanoid and selection components
//! - `render`: raster sink contract, macroquad sink and image store
//! - `input`: per-frame keyboard and mouse state
//! - `config`: RON scene configuration

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod game;
pub mod input;
pub mod iso;
pub mod map;
pub mod render;
pub mod scene;
