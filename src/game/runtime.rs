//! Frame Runtime
//!
//! One `Game::step` is one frame:
//! 1. update phase for every entity
//! 2. draw phase, where drawables push themselves into the render queue
//! 3. clear the target and flush the queue in order
//!
//! Input is sampled by the caller before `step`; pacing (`FpsLimit`) and
//! quit handling belong to the frame loop in `main`.

use macroquad::color::BLACK;
use serde::{Deserialize, Serialize};

use super::component::{DispatchError, Phase};
use super::renderer::RenderQueue;
use super::world::World;
use crate::input::InputSource;
use crate::render::RasterSink;

/// Frame timing data for the fps trace log
#[derive(Debug, Clone, Default)]
pub struct FrameTimings {
    /// Input sampling time (ms)
    pub input_ms: f32,
    /// Update + draw dispatch and queue flush (ms)
    pub step_ms: f32,
    /// Total frame time (ms)
    pub total_ms: f32,
}

impl FrameTimings {
    /// Start timing a section (returns time in seconds from macroquad)
    pub fn start() -> f64 {
        macroquad::prelude::get_time()
    }

    /// Get elapsed time in ms since start
    pub fn elapsed_ms(start: f64) -> f32 {
        ((macroquad::prelude::get_time() - start) * 1000.0) as f32
    }
}

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    Fps60,
    /// As fast as the display allows
    #[default]
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }
}

/// Everything a phase callable may touch besides its own entity.
pub struct Frame<'a> {
    /// Seconds since the previous frame
    pub dt: f32,
    pub input: &'a dyn InputSource,
    /// Only draw-phase callables enqueue
    pub queue: &'a mut RenderQueue,
}

impl<'a> Frame<'a> {
    pub fn new(dt: f32, input: &'a dyn InputSource, queue: &'a mut RenderQueue) -> Self {
        Self { dt, input, queue }
    }
}

/// The world plus its render queue.
#[derive(Debug, Default)]
pub struct Game {
    pub world: World,
    queue: RenderQueue,
    frames: u64,
}

impl Game {
    pub fn new(world: World) -> Self {
        Self {
            world,
            queue: RenderQueue::new(),
            frames: 0,
        }
    }

    /// Frames completed successfully so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame. Any dispatch failure aborts the frame; the queue is
    /// left empty either way.
    pub fn step(
        &mut self,
        dt: f32,
        input: &dyn InputSource,
        sink: &mut dyn RasterSink,
    ) -> Result<(), DispatchError> {
        debug_assert!(self.queue.is_empty());

        let mut frame = Frame::new(dt, input, &mut self.queue);
        let dispatched = self
            .world
            .perform_calls(Phase::UPDATE, &mut frame)
            .and_then(|()| self.world.perform_calls(Phase::DRAW, &mut frame));

        if let Err(e) = dispatched {
            self.queue.clear();
            return Err(e);
        }

        sink.clear(BLACK);
        self.queue.flush(sink);
        self.frames += 1;
        Ok(())
    }
}
