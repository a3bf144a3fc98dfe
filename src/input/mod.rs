//! Input handling
//!
//! Keyboard and mouse state sampled once per frame, before the update
//! phase. Components read it through the `InputSource` trait so tests can
//! drive them with scripted input.

mod state;

pub use state::*;
