//! Humanoid
//!
//! A character sprite standing on the grid. Its feet sit at `ANCHOR` of
//! the image, and it orders by how far it stands from the point the bottom
//! center of the screen looks at: nearer the bottom paints later.

use std::cell::Cell;
use std::rc::Rc;

use macroquad::math::Vec2;

use super::SceneContext;
use crate::game::{Binding, Component, ComponentError, Drawable, EntityHeader, Frame, Phase};
use crate::render::{ImageHandle, RasterSink};

/// Fraction of the sprite size that lands on the entity position
pub const ANCHOR: Vec2 = Vec2::new(0.5, 0.875);

pub struct Humanoid {
    sprite: Rc<HumanoidSprite>,
}

struct HumanoidSprite {
    ctx: Rc<SceneContext>,
    image: ImageHandle,
    /// Copied from the entity each draw
    position: Cell<Vec2>,
}

impl Humanoid {
    pub fn new(ctx: Rc<SceneContext>, image: ImageHandle) -> Self {
        Self {
            sprite: Rc::new(HumanoidSprite {
                ctx,
                image,
                position: Cell::new(Vec2::ZERO),
            }),
        }
    }

    fn draw(
        &mut self,
        entity: &mut EntityHeader,
        frame: &mut Frame<'_>,
    ) -> Result<(), ComponentError> {
        self.sprite.position.set(entity.position);
        frame.queue.enqueue(self.sprite.clone());
        Ok(())
    }
}

impl HumanoidSprite {
    fn anchor_offset(&self) -> Vec2 {
        ANCHOR * Vec2::new(self.image.width() as f32, self.image.height() as f32)
    }
}

impl Drawable for HumanoidSprite {
    fn order_value(&self) -> i64 {
        let ctx = &self.ctx;
        let mut look = ctx.projection.to_screen(ctx.camera.position());
        look.y += ctx.camera.viewport().y / 2.0;
        let distance = ctx.projection.to_grid(look).distance(self.position.get());
        -(distance.floor() as i64)
    }

    fn render_into(&self, sink: &mut dyn RasterSink) {
        let ctx = &self.ctx;
        let feet = ctx.projection.to_screen(self.position.get());
        let at = feet - self.anchor_offset() + ctx.draw_offset();
        sink.blit(self.image, at);
    }
}

impl Component for Humanoid {
    const NAME: &'static str = "Humanoid";
    const BINDINGS: &'static [Binding<Self>] =
        &[Binding { phase: Phase::DRAW, name: "draw", handler: Humanoid::draw }];

    fn cleanup(&mut self, entity: &mut EntityHeader) {
        log::debug!("humanoid '{}' left the scene at {}", entity.name, entity.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{RenderQueue, World};
    use crate::render::{builtin, RecordingSink};
    use crate::scene::testing::{context, StubInput};

    fn spawn_humanoids(ctx: &Rc<SceneContext>, image: ImageHandle, at: &[Vec2]) -> World {
        let mut world = World::new();
        for (i, pos) in at.iter().enumerate() {
            let entity = world.spawn(format!("humanoid-{i}")).unwrap();
            entity.set_position(*pos);
            entity.attach(Humanoid::new(ctx.clone(), image)).unwrap();
        }
        world
    }

    fn draw(world: &mut World) -> RecordingSink {
        let input = StubInput::default();
        let mut queue = RenderQueue::new();
        let mut frame = Frame::new(0.0, &input, &mut queue);
        world.perform_calls(Phase::DRAW, &mut frame).unwrap();
        let mut sink = RecordingSink::new();
        queue.flush(&mut sink);
        sink
    }

    #[test]
    fn test_anchor_puts_feet_on_position() {
        let (ctx, mut store) = context(50, Vec2::new(25.0, 25.0));
        let image = store.load(builtin::HUMANOID).unwrap();
        let mut world = spawn_humanoids(&ctx, image, &[Vec2::new(25.0, 25.0)]);

        let sink = draw(&mut world);
        let feet = Vec2::new(image.width() as f32 * 0.5, image.height() as f32 * 0.875);
        assert_eq!(sink.blits(), vec![(image, Vec2::new(640.0, 360.0) - feet)]);
    }

    #[test]
    fn test_order_is_negative_floored_distance() {
        let (ctx, mut store) = context(50, Vec2::new(25.0, 25.0));
        let image = store.load(builtin::HUMANOID).unwrap();
        let humanoid = Humanoid::new(ctx.clone(), image);

        // Bottom center of a 720px viewport looks 360px below the camera
        let camera = ctx.projection.to_screen(Vec2::new(25.0, 25.0));
        let look = ctx.projection.to_grid(camera + Vec2::new(0.0, 360.0));
        assert!((look - Vec2::new(13.75, 36.25)).length() < 1e-4);

        humanoid.sprite.position.set(look);
        assert_eq!(humanoid.sprite.order_value(), 0);

        humanoid.sprite.position.set(look + Vec2::new(3.5, 0.0));
        assert_eq!(humanoid.sprite.order_value(), -3);
    }

    #[test]
    fn test_nearer_the_screen_bottom_paints_later() {
        let (ctx, mut store) = context(50, Vec2::new(25.0, 25.0));
        let image = store.load(builtin::HUMANOID).unwrap();
        // Spawned far first so ordering, not spawn order, decides
        let far = Vec2::new(40.0, 10.0);
        let near = Vec2::new(15.0, 35.0);
        let mut world = spawn_humanoids(&ctx, image, &[far, near]);

        let sink = draw(&mut world);
        let offset = ctx.draw_offset();
        let anchor = Vec2::new(image.width() as f32, image.height() as f32) * ANCHOR;
        let painted: Vec<Vec2> = sink.blits().into_iter().map(|(_, at)| at).collect();
        assert_eq!(
            painted,
            vec![
                ctx.projection.to_screen(far) - anchor + offset,
                ctx.projection.to_screen(near) - anchor + offset,
            ]
        );
    }

    #[test]
    fn test_despawned_humanoid_stops_drawing() {
        let (ctx, mut store) = context(10, Vec2::ZERO);
        let image = store.load(builtin::HUMANOID).unwrap();
        let mut world = spawn_humanoids(&ctx, image, &[Vec2::ZERO, Vec2::ONE]);
        assert_eq!(draw(&mut world).blits().len(), 2);

        world.despawn("humanoid-0").unwrap();
        assert_eq!(world.names().collect::<Vec<_>>(), vec!["humanoid-1"]);

        let anchor = Vec2::new(image.width() as f32, image.height() as f32) * ANCHOR;
        let expected = ctx.projection.to_screen(Vec2::ONE) - anchor + ctx.draw_offset();
        assert_eq!(draw(&mut world).blits(), vec![(image, expected)]);
    }
}
