//! Integration tests for the frame loop: per-tick algorithm order, elapsed
//! time, pause/resume semantics, run-once keys and keyboard polling.

use std::sync::{Arc, Mutex};

use overture2d::assets::camera::Camera;
use overture2d::assets::gameobject::GameObject;
use overture2d::assets::loader::EagerLoader;
use overture2d::assets::map::Map;
use overture2d::assets::sprite::Sprite;
use overture2d::engine::frameloop::ManualTicks;
use overture2d::input::{KeyEvent, ScriptedKeys};
use overture2d::math::Rect;
use overture2d::notices::NoticeCode;
use overture2d::render::recording::{RecordingSurface, SurfaceOp};
use overture2d::{Asset, Engine, EngineConfig, WorldItem};

const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_engine(width: u32, height: u32) -> Engine<RecordingSurface> {
    let config = EngineConfig::with_size(width, height);
    let surface = RecordingSurface::new(width, height);
    Engine::new(config, surface, Box::new(EagerLoader::new())).expect("engine construction")
}

fn ship_sprite() -> Sprite {
    Sprite::new("ship", "assets/ship.png")
        .with_size(32.0, 16.0)
        .with_position(100.0, 100.0)
}

// =============================================================================
// Elapsed time
// =============================================================================

#[test]
fn first_tick_delta_is_zero_then_timestamp_difference() {
    let mut engine = make_engine(320, 240);
    let deltas = Arc::new(Mutex::new(Vec::<f32>::new()));
    let probe = deltas.clone();

    engine
        .preload(|| vec![Asset::Sprite(ship_sprite())])
        .update(move |_ctx, dt| probe.lock().unwrap().push(dt));

    let mut ticks = ManualTicks::from_stamps([0.0, 1.0, 1.25, 1.75]);
    engine.run(&mut ticks);

    let deltas = deltas.lock().unwrap();
    assert_eq!(deltas.len(), 3);
    assert!(approx_eq(deltas[0], 0.0));
    assert!(approx_eq(deltas[1], 0.25));
    assert!(approx_eq(deltas[2], 0.5));
    assert_eq!(engine.frame_time().frame_count, 3);
}

// =============================================================================
// Per-tick draw/clear order
// =============================================================================

#[test]
fn tick_blits_cameras_then_clears_object_regions() {
    let mut engine = make_engine(320, 240);
    engine
        .preload(|| vec![Asset::Sprite(ship_sprite())])
        .load(|assets| {
            let sprite = assets.sprite("ship");
            vec![
                WorldItem::Map(Map::new("starfield", "assets/starfield.png", 640.0, 480.0)),
                WorldItem::Camera(Camera::new(
                    "main",
                    "starfield",
                    Rect::new(16.0, 8.0, 320.0, 240.0),
                )),
                WorldItem::Object(GameObject::new("hero", sprite)),
            ]
        })
        .update(|ctx, _dt| ctx.animate_by_name("hero"));

    engine.advance(0.0); // pump only, no drawing yet
    assert_eq!(engine.surface().op_count(), 0);

    engine.advance(0.016);
    let ops = engine.surface_mut().take_ops();

    // 1. Camera viewport stretch-fit onto the full surface.
    assert_eq!(
        ops[0],
        SurfaceOp::DrawImageRegion {
            source: "assets/starfield.png".to_string(),
            src: Rect::new(16.0, 8.0, 320.0, 240.0),
            dest: Rect::new(0.0, 0.0, 320.0, 240.0),
        }
    );
    // 2. Object region erased before the user callback draws.
    assert_eq!(
        ops[1],
        SurfaceOp::ClearRect {
            rect: Rect::new(100.0, 100.0, 32.0, 16.0)
        }
    );
    // 3. The callback's animate draw, bracketed by save/restore.
    assert_eq!(ops[2], SurfaceOp::Save);
    assert_eq!(*ops.last().unwrap(), SurfaceOp::Restore);
    assert!(ops.iter().any(|op| matches!(
        op,
        SurfaceOp::DrawImage { source, .. } if source == "assets/ship.png"
    )));
}

#[test]
fn camera_with_missing_map_logs_once_and_draws_nothing() {
    let mut engine = make_engine(320, 240);
    engine
        .preload(|| vec![Asset::Sprite(ship_sprite())])
        .load(|_assets| {
            vec![WorldItem::Camera(Camera::new(
                "main",
                "gone",
                Rect::new(0.0, 0.0, 320.0, 240.0),
            ))]
        })
        .update(|_ctx, _dt| {});

    let mut ticks = ManualTicks::from_stamps([0.0, 0.016, 0.033]);
    engine.run(&mut ticks);

    assert!(engine.has_notice(NoticeCode::MissingMap, "gone"));
    assert_eq!(engine.surface().op_count(), 0);
}

#[test]
fn clear_region_uses_the_global_scale() {
    let mut engine = make_engine(640, 480);
    engine.set_scale(2.0);
    engine
        .preload(|| vec![Asset::Sprite(ship_sprite())])
        .load(|assets| {
            let sprite = assets.sprite("ship");
            vec![WorldItem::Object(GameObject::new("hero", sprite))]
        })
        .update(|_ctx, _dt| {});

    let mut ticks = ManualTicks::from_stamps([0.0, 0.016]);
    engine.run(&mut ticks);

    let ops = engine.surface_mut().take_ops();
    assert_eq!(
        ops[0],
        SurfaceOp::ClearRect {
            rect: Rect::new(200.0, 200.0, 64.0, 32.0)
        }
    );
}

// =============================================================================
// Pause / resume
// =============================================================================

#[test]
fn pause_from_the_callback_stops_after_the_current_tick() {
    let mut engine = make_engine(320, 240);
    let ticks_seen = Arc::new(Mutex::new(0u32));
    let probe = ticks_seen.clone();

    engine
        .preload(|| vec![Asset::Sprite(ship_sprite())])
        .update(move |ctx, _dt| {
            *probe.lock().unwrap() += 1;
            ctx.pause();
            assert!(!ctx.is_running());
        });

    let mut ticks = ManualTicks::from_stamps([0.0, 0.016, 0.033, 0.05]);
    engine.run(&mut ticks);

    // The pausing tick ran to completion; no tick after it.
    assert_eq!(*ticks_seen.lock().unwrap(), 1);
    assert!(!engine.is_running());

    engine.resume();
    let mut more = ManualTicks::from_stamps([0.066, 0.083]);
    engine.run(&mut more);
    assert_eq!(*ticks_seen.lock().unwrap(), 2);
}

#[test]
fn pause_and_resume_are_idempotent() {
    let mut engine = make_engine(320, 240);
    engine
        .preload(|| vec![Asset::Sprite(ship_sprite())])
        .update(|_ctx, _dt| {});
    engine.advance(0.0);

    engine.pause();
    engine.pause();
    assert!(!engine.is_running());

    engine.resume();
    engine.resume();
    assert!(engine.is_running());
}

#[test]
fn resume_before_update_stage_is_a_noop() {
    let mut engine = make_engine(320, 240);
    engine.resume();
    assert!(!engine.is_running());
}

// =============================================================================
// FrameContext
// =============================================================================

#[test]
fn run_once_executes_once_per_key() {
    let mut engine = make_engine(320, 240);
    let calls = Arc::new(Mutex::new(Vec::<String>::new()));
    let probe = calls.clone();

    engine
        .preload(|| vec![Asset::Sprite(ship_sprite())])
        .update(move |ctx, _dt| {
            let probe_a = probe.clone();
            ctx.run_once("intro", move |_ctx| {
                probe_a.lock().unwrap().push("intro".to_string());
            });
            let probe_b = probe.clone();
            ctx.run_once("outro", move |_ctx| {
                probe_b.lock().unwrap().push("outro".to_string());
            });
        });

    let mut ticks = ManualTicks::from_stamps([0.0, 0.016, 0.033, 0.05]);
    engine.run(&mut ticks);

    assert_eq!(*calls.lock().unwrap(), vec!["intro", "outro"]);
}

#[test]
fn context_lookup_misses_log_once_per_name() {
    let mut engine = make_engine(320, 240);
    engine
        .preload(|| vec![Asset::Sprite(ship_sprite())])
        .update(|ctx, _dt| {
            assert!(ctx.object("ghost").is_none());
            assert!(ctx.sprite("ship").is_some());
            assert!(ctx.map("nowhere").is_none());
        });

    let mut ticks = ManualTicks::from_stamps([0.0, 0.016, 0.033]);
    engine.run(&mut ticks);

    assert!(engine.has_notice(NoticeCode::MissingObject, "ghost"));
    assert!(engine.has_notice(NoticeCode::MissingMap, "nowhere"));
    assert!(!engine.has_notice(NoticeCode::MissingSprite, "ship"));
}

#[test]
fn animate_many_draws_in_layer_order() {
    let mut engine = make_engine(320, 240);
    engine
        .preload(|| {
            vec![
                Asset::Sprite(Sprite::new("front", "assets/front.png").with_size(8.0, 8.0)),
                Asset::Sprite(Sprite::new("back", "assets/back.png").with_size(8.0, 8.0)),
            ]
        })
        .load(|assets| {
            let front = assets.sprite("front");
            let back = assets.sprite("back");
            vec![
                WorldItem::Object(GameObject::new("front", front).with_layer(5)),
                WorldItem::Object(GameObject::new("back", back).with_layer(-5)),
            ]
        })
        .update(|ctx, _dt| {
            // Listed front-first; layer order must draw "back" first anyway.
            ctx.animate_many(&["front", "back"]);
        });

    let mut ticks = ManualTicks::from_stamps([0.0, 0.016]);
    engine.run(&mut ticks);

    let ops = engine.surface_mut().take_ops();
    let draws: Vec<&str> = ops
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::DrawImage { source, .. } => Some(source.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(draws, vec!["assets/back.png", "assets/front.png"]);
}

// =============================================================================
// Keyboard polling
// =============================================================================

#[test]
fn keyboard_edges_fold_into_polled_state() {
    let mut engine = make_engine(320, 240);
    let mut keys = ScriptedKeys::new();
    keys.push_frame([KeyEvent::press("right")]);
    keys.push_frame([]);
    keys.push_frame([KeyEvent::release("right")]);
    engine.use_keyboard(Box::new(keys));

    let states = Arc::new(Mutex::new(Vec::<(bool, bool, bool)>::new()));
    let probe = states.clone();

    engine
        .preload(|| vec![Asset::Sprite(ship_sprite())])
        .update(move |ctx, _dt| {
            let kb = ctx.keyboard().expect("keyboard attached");
            probe.lock().unwrap().push((
                kb.is_down("right"),
                kb.just_pressed("right"),
                kb.just_released("right"),
            ));
        });

    let mut ticks = ManualTicks::from_stamps([0.0, 0.016, 0.033, 0.05]);
    engine.run(&mut ticks);

    let states = states.lock().unwrap();
    assert_eq!(states.len(), 3);
    assert_eq!(states[0], (true, true, false)); // press edge
    assert_eq!(states[1], (true, false, false)); // held
    assert_eq!(states[2], (false, false, true)); // release edge
}
