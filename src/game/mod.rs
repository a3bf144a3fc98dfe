//! Game Foundation Module
//!
//! A small entity/component runtime for the isometric scene.
//!
//! Key concepts:
//! - Entity: named, generationally-identified thing with an iso position
//! - Component: behavior unit that declares which callables run in which phase
//! - World: spawn-ordered registry that dispatches phases
//! - RenderQueue: per-frame drawables sorted by order value
//!
//! A frame is update phase, then draw phase, then queue flush. No runtime
//! type registration; bindings are compile-time constants on each component.

pub mod component;
pub mod entity;
pub mod renderer;
pub mod runtime;
pub mod world;

// Re-export main types
pub use component::{Binding, Component, ComponentError, DispatchError, Phase};
pub use entity::EntityHeader;
pub use renderer::{order, Drawable, RenderQueue};
pub use runtime::{FpsLimit, Frame, FrameTimings, Game};
pub use world::World;
