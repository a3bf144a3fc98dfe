//! iso-scene: a small real-time isometric scene
//!
//! A procedurally generated tile map seen through a scrolling camera, with a
//! minimap overlay and a few characters standing on the grid:
//! - Arrow keys / WASD scroll the camera
//! - Left-drag draws a selection box
//! - Escape or closing the window quits
//!
//! Configuration is read from `scene.ron` (or the file named by
//! `ISO_SCENE_CONFIG`); `RUST_LOG` controls logging.

use anyhow::Context;
use macroquad::prelude::*;

use iso_scene::config::SceneConfig;
use iso_scene::game::{FrameTimings, Game};
use iso_scene::input::{InputSource, InputState, Key};
use iso_scene::render::{ImageSource, ImageStore, MacroquadSink, TextureCache};
use iso_scene::{scene, VERSION};

fn window_conf() -> Conf {
    // Logging is not up yet; a bad file is reported again by `run`
    let config = SceneConfig::from_env().unwrap_or_default();
    Conf {
        window_title: format!("iso-scene v{}", VERSION),
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{:#}", e);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = SceneConfig::from_env().context("failed to load scene configuration")?;

    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = ::rand::random();
            log::info!("no seed configured, using {}", seed);
            seed
        }
    };

    let source = match &config.asset_dir {
        Some(dir) => ImageSource::Directory(dir.clone()),
        None => ImageSource::Builtin { tile_size: config.tile_size as u32 },
    };
    let mut images = ImageStore::new(source);
    let world = scene::build_default_scene(&config, &mut images, seed)
        .context("failed to build the default scene")?;

    let mut game = Game::new(world);
    let mut input = InputState::new();
    let mut textures = TextureCache::new();
    let mut timings = FrameTimings::default();

    log::info!("=== iso-scene v{} ({} fps limit) ===", VERSION, config.fps_limit.label());
    prevent_quit();

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();

        if is_quit_requested() {
            log::info!("window closed");
            break;
        }

        let input_start = FrameTimings::start();
        input.poll();
        timings.input_ms = FrameTimings::elapsed_ms(input_start);

        if input.was_pressed(Key::Escape) {
            log::info!("escape pressed");
            break;
        }

        let dt = get_frame_time();
        let step_start = FrameTimings::start();
        let mut sink = MacroquadSink::new(&images, &mut textures);
        game.step(dt, &input, &mut sink)
            .with_context(|| format!("frame {} aborted", game.frames() + 1))?;
        timings.step_ms = FrameTimings::elapsed_ms(step_start);
        timings.total_ms = FrameTimings::elapsed_ms(frame_start);

        if dt > 0.0 {
            log::trace!(
                "{:.1} fps (input {:.2}ms, step {:.2}ms, total {:.2}ms)",
                1.0 / dt,
                timings.input_ms,
                timings.step_ms,
                timings.total_ms
            );
        }

        if let Some(target_frame_time) = config.fps_limit.frame_time() {
            let elapsed = get_time() - frame_start;
            let remaining = target_frame_time - elapsed;

            if remaining > 0.0 {
                // Native: use sleep for bulk, then spin-wait for precision
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let spin_margin = 0.002; // 2ms
                    while get_time() - frame_start + spin_margin < target_frame_time {
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                    while get_time() - frame_start < target_frame_time {
                        std::hint::spin_loop();
                    }
                }
                // WASM: no thread::sleep available
                #[cfg(target_arch = "wasm32")]
                {
                    while get_time() - frame_start < target_frame_time {}
                }
            }
        }

        next_frame().await;
    }

    log::info!("stopped after {} frames", game.frames());
    Ok(())
}
