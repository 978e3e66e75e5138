//! Overture 2D demo entry point.
//!
//! Runs the staged lifecycle end to end against the headless seams: a
//! recording surface, an eager asset loader, scripted keys and a fixed or
//! wall-clock tick source. Useful as a smoke test and as a wiring example
//! for real hosts.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 120
//! ```

use clap::Parser;
use std::path::PathBuf;

use overture2d::assets::audio::AudioClip;
use overture2d::assets::boxcollider::BoxCollider;
use overture2d::assets::camera::Camera;
use overture2d::assets::gameobject::GameObject;
use overture2d::assets::loader::EagerLoader;
use overture2d::assets::map::Map;
use overture2d::assets::sprite::Sprite;
use overture2d::engine::frameloop::{FixedTicks, RealtimeTicks};
use overture2d::input::{KeyEvent, ScriptedKeys};
use overture2d::math::Rect;
use overture2d::render::recording::RecordingSurface;
use overture2d::{Asset, Engine, EngineConfig, WorldItem};

/// Overture 2D headless demo scene
#[derive(Parser)]
#[command(version, about = "Runs the Overture 2D demo scene without a window")]
struct Cli {
    /// Path to an INI config file. Defaults are used when absent.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Pace frames against the wall clock instead of a fixed step.
    #[arg(long)]
    realtime: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig::new();
    if let Some(path) = cli.config {
        config.config_path = path;
        if let Err(e) = config.load_from_file() {
            log::warn!("{}, using defaults", e);
        }
    }
    let target_fps = config.target_fps;

    let surface = RecordingSurface::new(config.surface_width, config.surface_height);
    let mut engine = match Engine::new(config, surface, Box::new(EagerLoader::new())) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("failed to construct engine: {}", e);
            std::process::exit(1);
        }
    };

    // Hold "right" from the second frame on.
    let mut keys = ScriptedKeys::new();
    keys.push_frame([]);
    keys.push_frame([KeyEvent::press("right")]);
    engine.use_keyboard(Box::new(keys));

    engine
        .preload(|| {
            vec![
                Asset::Sprite(
                    Sprite::new("ship", "assets/textures/ship.png")
                        .with_size(32.0, 16.0)
                        .with_position(144.0, 200.0),
                ),
                Asset::Sprite(Sprite::new("drone", "assets/textures/drone.png").with_size(16.0, 16.0)),
                Asset::Audio(
                    AudioClip::new("engine-hum", "assets/audio/engine_hum.ogg").with_looped(true),
                ),
            ]
        })
        .load(|assets| {
            let ship = assets.sprite("ship");
            let drone = assets.sprite("drone");

            let mut items = vec![
                WorldItem::Map(Map::new(
                    "starfield",
                    "assets/maps/starfield.png",
                    640.0,
                    480.0,
                )),
                WorldItem::Camera(Camera::new(
                    "main",
                    "starfield",
                    Rect::new(0.0, 0.0, 320.0, 240.0),
                )),
                WorldItem::Object(
                    GameObject::new("player", ship)
                        .with_collider(BoxCollider::new(32.0, 16.0))
                        .with_layer(1),
                ),
            ];
            for i in 0..4u32 {
                let x = fastrand::f32() * 288.0;
                let y = fastrand::f32() * 120.0;
                items.push(WorldItem::Object(
                    GameObject::new(format!("drone-{}", i + 1), drone.clone())
                        .with_position(x, y)
                        .with_collider(BoxCollider::new(16.0, 16.0)),
                ));
            }
            items
        })
        .update(|ctx, dt| {
            ctx.run_once("banner", |ctx| {
                let (w, h) = ctx.surface_dimensions();
                log::info!("first tick on a {}x{} surface", w, h);
            });

            let (left, right) = match ctx.keyboard() {
                Ok(kb) => (kb.is_down("left"), kb.is_down("right")),
                Err(_) => (false, false),
            };
            if let Some(player) = ctx.object("player") {
                if left {
                    player.position.x -= 60.0 * dt;
                }
                if right {
                    player.position.x += 60.0 * dt;
                }
            }

            ctx.animate_many(&["drone-1", "drone-2", "drone-3", "drone-4"]);
            ctx.animate_by_name("player");
        });

    if cli.realtime {
        let mut ticks = RealtimeTicks::new(target_fps).with_frame_limit(cli.frames);
        engine.run(&mut ticks);
    } else {
        let mut ticks = FixedTicks::new(target_fps, cli.frames);
        engine.run(&mut ticks);
    }

    let spawned = engine.instantiate("player", 2);
    log::info!("instanced {:?} from 'player'", spawned);
    if engine.colliding("player", "player-1") {
        log::info!("fresh instance overlaps its template, as expected");
    }

    log::info!(
        "demo finished: state={:?}, frames={}, surface ops={}, objects={}",
        engine.state(),
        engine.frame_time().frame_count,
        engine.surface().op_count(),
        engine.objects().len()
    );

    engine.end();
}
