//! Isometric Geometry
//!
//! Two small pieces every other part of the scene builds on:
//! - `IsoProjection`: the iso grid <-> screen transform pair
//! - `DiagonalWindow`: bounded traversal of the grid cells visible on screen
//!
//! Camera, map, minimap and sprites all project through `IsoProjection`;
//! nothing else re-derives the formulas.

pub mod projection;
pub mod window;

pub use projection::IsoProjection;
pub use window::DiagonalWindow;
