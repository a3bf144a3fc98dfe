//! Default Scene Assembly
//!
//! Spawn order, which is also dispatch order:
//! `map`, `minimap`, `camera`, `humanoid-0..n`, `input`.
//! The camera starts at the grid center; humanoid `i` stands at `(i, i)`.

use std::rc::Rc;

use macroquad::math::Vec2;

use super::{Camera, CameraView, Humanoid, MapLayer, Minimap, SceneContext, SelectionBox};
use crate::config::SceneConfig;
use crate::game::{DispatchError, World};
use crate::iso::IsoProjection;
use crate::map::{MapError, TileGrid, TilePalette};
use crate::render::{builtin, AssetError, ImageStore};

/// Errors raised while assembling the default scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Build the default scene described by `config`, loading images into
/// `images`. `seed` is the tile noise seed actually used.
pub fn build_default_scene(
    config: &SceneConfig,
    images: &mut ImageStore,
    seed: u32,
) -> Result<World, SceneError> {
    let projection = IsoProjection::new(config.tile_size);

    let base = images.load(builtin::TILE)?;
    let expected = projection.tile_extent();
    let (expected_w, expected_h) = (expected.x as u32, expected.y as u32);
    if base.width() != expected_w || base.height() != expected_h {
        return Err(MapError::TileSizeMismatch {
            expected_w,
            expected_h,
            actual_w: base.width(),
            actual_h: base.height(),
        }
        .into());
    }
    let humanoid_image = images.load(builtin::HUMANOID)?;

    let grid = TileGrid::generate(config.grid_width, config.grid_height, config.tile_delta, seed)?;
    let palette = TilePalette::build(images, base, grid.delta(), config.tint_strength);
    log::info!(
        "generated {}x{} grid, {} tile variants, seed {}",
        grid.width(),
        grid.height(),
        palette.len(),
        grid.seed()
    );

    let center = Vec2::new(grid.width() as f32, grid.height() as f32) / 2.0;
    let viewport = Vec2::new(config.window_width as f32, config.window_height as f32);
    let ctx = Rc::new(SceneContext {
        projection,
        grid,
        palette,
        camera: CameraView::new(center, viewport),
    });

    let mut world = World::new();
    world.spawn("map")?.attach(MapLayer::new(ctx.clone())?)?;
    world.spawn("minimap")?.attach(Minimap::new(ctx.clone(), config.minimap_scale))?;

    let camera = world.spawn("camera")?;
    camera.set_position(center);
    camera.attach(Camera::new(ctx.clone(), config.scroll_speed))?;

    for i in 0..config.humanoid_count {
        let humanoid = world.spawn(format!("humanoid-{i}"))?;
        humanoid.set_position(Vec2::splat(i as f32));
        humanoid.attach(Humanoid::new(ctx.clone(), humanoid_image))?;
    }

    world.spawn("input")?.attach(SelectionBox::new())?;

    log::info!("{} entities: {:?}", world.entity_count(), world.names().collect::<Vec<_>>());
    Ok(world)
}
