//! Camera
//!
//! Each update the input axis becomes a screen-space displacement, which
//! `to_grid` turns into iso movement. The result is clamped per axis to
//! `[0, width] x [0, height]`.

use std::rc::Rc;

use macroquad::math::Vec2;

use super::SceneContext;
use crate::game::{Binding, Component, ComponentError, EntityHeader, Frame, Phase};

pub struct Camera {
    ctx: Rc<SceneContext>,
    /// Screen pixels per second at full axis deflection
    scroll_speed: f32,
}

impl Camera {
    pub fn new(ctx: Rc<SceneContext>, scroll_speed: f32) -> Self {
        Self { ctx, scroll_speed }
    }

    /// See `SceneContext::draw_offset`.
    pub fn draw_offset(&self) -> Vec2 {
        self.ctx.draw_offset()
    }

    fn follow_input(
        &mut self,
        entity: &mut EntityHeader,
        frame: &mut Frame<'_>,
    ) -> Result<(), ComponentError> {
        if !frame.dt.is_finite() {
            return Err(ComponentError::NonFinite("frame delta"));
        }

        let displacement = frame.input.axis() * self.scroll_speed * frame.dt;
        let moved = entity.position + self.ctx.projection.to_grid(displacement);
        if !moved.is_finite() {
            return Err(ComponentError::NonFinite("camera position"));
        }

        let position = moved.clamp(Vec2::ZERO, self.ctx.bounds());
        entity.position = position;
        self.ctx.camera.set_position(position);
        Ok(())
    }
}

impl Component for Camera {
    const NAME: &'static str = "Camera";
    const BINDINGS: &'static [Binding<Self>] =
        &[Binding { phase: Phase::UPDATE, name: "follow_input", handler: Camera::follow_input }];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DispatchError, RenderQueue, World};
    use crate::scene::testing::{context, StubInput};

    fn camera_world(ctx: &Rc<SceneContext>, speed: f32) -> World {
        let mut world = World::new();
        let entity = world.spawn("camera").unwrap();
        entity.set_position(ctx.camera.position());
        entity.attach(Camera::new(ctx.clone(), speed)).unwrap();
        world
    }

    fn update(world: &mut World, dt: f32, input: &StubInput) -> Result<(), DispatchError> {
        let mut queue = RenderQueue::new();
        let mut frame = Frame::new(dt, input, &mut queue);
        world.perform_calls(Phase::UPDATE, &mut frame)
    }

    #[test]
    fn test_idle_input_keeps_position() {
        let (ctx, _) = context(50, Vec2::new(25.0, 25.0));
        let mut world = camera_world(&ctx, 600.0);
        update(&mut world, 0.5, &StubInput::default()).unwrap();
        assert_eq!(world.get("camera").unwrap().position(), Vec2::new(25.0, 25.0));
    }

    #[test]
    fn test_moves_through_to_grid() {
        let (ctx, _) = context(50, Vec2::new(25.0, 25.0));
        let mut world = camera_world(&ctx, 64.0);

        // One second of full right: 64 screen px = half a tile along each iso axis
        let input = StubInput { axis: Vec2::new(1.0, 0.0), ..Default::default() };
        update(&mut world, 1.0, &input).unwrap();

        let pos = world.get("camera").unwrap().position();
        assert!((pos - Vec2::new(26.0, 26.0)).length() < 1e-4);
        assert_eq!(ctx.camera.position(), pos);
    }

    #[test]
    fn test_clamps_overshoot_to_bounds() {
        let (ctx, _) = context(50, Vec2::new(25.0, 25.0));

        // Screen displacement that lands exactly on (-5, 60) in iso space
        let target = Vec2::new(-5.0, 60.0);
        let screen = ctx.projection.to_screen(target - Vec2::new(25.0, 25.0));
        let mut world = camera_world(&ctx, screen.length());
        let input = StubInput { axis: screen.normalize(), ..Default::default() };
        update(&mut world, 1.0, &input).unwrap();

        let pos = world.get("camera").unwrap().position();
        assert_eq!(pos, Vec2::new(0.0, 50.0));
        assert_eq!(ctx.camera.position(), Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_never_leaves_bounds() {
        let (ctx, _) = context(10, Vec2::new(5.0, 5.0));
        let mut world = camera_world(&ctx, 600.0);

        let axes = [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y];
        for axis in axes {
            let input = StubInput { axis, ..Default::default() };
            for _ in 0..20 {
                update(&mut world, 0.1, &input).unwrap();
                let pos = world.get("camera").unwrap().position();
                assert!(pos.x >= 0.0 && pos.x <= 10.0);
                assert!(pos.y >= 0.0 && pos.y <= 10.0);
            }
        }
    }

    #[test]
    fn test_non_finite_delta_fails_the_update() {
        let (ctx, _) = context(50, Vec2::new(25.0, 25.0));
        let mut world = camera_world(&ctx, 600.0);
        let err = update(&mut world, f32::NAN, &StubInput::default()).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Call { source: ComponentError::NonFinite("frame delta"), .. }
        ));
        assert_eq!(ctx.camera.position(), Vec2::new(25.0, 25.0));
    }

    #[test]
    fn test_draw_offset_centers_camera() {
        let (ctx, _) = context(50, Vec2::new(0.0, 0.0));
        let camera = Camera::new(ctx.clone(), 600.0);
        assert_eq!(camera.draw_offset(), Vec2::new(640.0, 360.0));
    }
}
