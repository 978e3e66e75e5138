//! Engine façade.
//!
//! Owns the registries, the lifecycle stage queue and the frame loop, and
//! exposes the whole public API: fluent `preload`/`load`/`update`
//! registration, `pause`/`resume`/`end`, and the utility operations
//! (instancing, collision tests, bounds checks, removal).
//!
//! Stage execution and ticking are driven from [`Engine::advance`], once per
//! host frame: while the lifecycle is still sequencing, an `advance` pumps
//! the stage queue; once the update stage is armed, each `advance` runs one
//! tick of the frame loop.

pub mod context;
pub mod frameloop;
pub mod lifecycle;

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender, unbounded};
use rustc_hash::FxHashSet;

use crate::assets::audio::AudioClip;
use crate::assets::camera::Camera;
use crate::assets::gameobject::GameObject;
use crate::assets::loader::{AssetKind, AssetLoader, AssetSignal};
use crate::assets::map::Map;
use crate::assets::sprite::Sprite;
use crate::assets::{Asset, WorldItem};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::input::{KeySource, Keyboard};
use crate::math::Rect;
use crate::notices::{NoticeCode, Notices};
use crate::registry::Store;
use crate::render::{RenderMode, RenderSettings, SmoothingQuality, Surface};
use context::{Assets, FrameContext};
use frameloop::{FrameTime, TickSource};
use lifecycle::{LifecycleState, LoadFn, PreloadFn, Stage, UpdateFn};

/// Assets dispatched to the loader whose settle signals have not all
/// arrived yet.
struct PreloadWait {
    pending: FxHashSet<String>,
    staged: Vec<Asset>,
}

/// The engine façade. Generic over the surface type so hosts and tests keep
/// typed access to their own surface; the loader stays behind a trait
/// object because the engine only ever pushes requests into it.
pub struct Engine<S: Surface> {
    surface: S,
    loader: Box<dyn AssetLoader>,
    signal_tx: Sender<AssetSignal>,
    signal_rx: Receiver<AssetSignal>,

    sprites: Store<Sprite>,
    audios: Store<AudioClip>,
    objects: Store<GameObject>,
    maps: Store<Map>,
    cameras: Store<Camera>,

    stages: VecDeque<Stage>,
    state: LifecycleState,
    preload_wait: Option<PreloadWait>,
    update_fn: Option<UpdateFn>,
    chain_error: Option<EngineError>,

    time: FrameTime,
    running: bool,

    keyboard: Option<Keyboard>,
    key_source: Option<Box<dyn KeySource>>,

    notices: Notices,
    run_once_keys: FxHashSet<String>,
    settings: RenderSettings,
}

impl<S: Surface> Engine<S> {
    /// Construct an engine over a surface and an asset loader.
    ///
    /// Fails with [`EngineError::Construction`] when the configured or the
    /// reported surface dimensions are zero.
    pub fn new(
        config: EngineConfig,
        surface: S,
        loader: Box<dyn AssetLoader>,
    ) -> Result<Self, EngineError> {
        if config.surface_width == 0 || config.surface_height == 0 {
            return Err(EngineError::Construction {
                width: config.surface_width,
                height: config.surface_height,
            });
        }
        let (width, height) = surface.dimensions();
        if width == 0 || height == 0 {
            return Err(EngineError::Construction { width, height });
        }

        let (signal_tx, signal_rx) = unbounded();
        let settings = RenderSettings {
            scale: config.scale,
            mode: config.render_mode,
            quality: config.quality,
        };
        Ok(Engine {
            surface,
            loader,
            signal_tx,
            signal_rx,
            sprites: Store::new(),
            audios: Store::new(),
            objects: Store::new(),
            maps: Store::new(),
            cameras: Store::new(),
            stages: VecDeque::new(),
            state: LifecycleState::Unset,
            preload_wait: None,
            update_fn: None,
            chain_error: None,
            time: FrameTime::default(),
            running: false,
            keyboard: None,
            key_source: None,
            notices: Notices::new(),
            run_once_keys: FxHashSet::default(),
            settings,
        })
    }

    // ------------------------------------------------------------------
    // Lifecycle registration (fluent; no stage logic runs here)
    // ------------------------------------------------------------------

    /// Queue the preload stage: `producer` declares the assets to load.
    pub fn preload(&mut self, producer: impl FnOnce() -> Vec<Asset> + 'static) -> &mut Self {
        self.stages.push_back(Stage::Preload(Box::new(producer)));
        self
    }

    /// Queue the load stage: `producer` builds world items from the
    /// preloaded assets.
    pub fn load(
        &mut self,
        producer: impl FnOnce(&mut Assets) -> Vec<WorldItem> + 'static,
    ) -> &mut Self {
        self.stages.push_back(Stage::Load(Box::new(producer)));
        self
    }

    /// Queue the update stage: `producer` becomes the per-tick callback.
    pub fn update(
        &mut self,
        producer: impl FnMut(&mut FrameContext, f32) + 'static,
    ) -> &mut Self {
        self.stages.push_back(Stage::Update(Box::new(producer)));
        self
    }

    // ------------------------------------------------------------------
    // Driving
    // ------------------------------------------------------------------

    /// Advance by one host frame: pump the stage queue while the lifecycle
    /// is sequencing, or run one tick once the frame loop is live.
    pub fn advance(&mut self, timestamp: f64) {
        if self.state == LifecycleState::Updating && self.running {
            self.tick(timestamp);
        } else {
            self.pump();
        }
    }

    /// Drive the engine from a tick source until it goes quiescent (paused,
    /// ended or errored) or the source stops producing frames.
    pub fn run(&mut self, ticks: &mut dyn TickSource) {
        while let Some(timestamp) = ticks.next_frame() {
            self.advance(timestamp);
            if !self.is_active() {
                break;
            }
        }
    }

    /// Whether another frame could make progress: the loop is running, a
    /// preload is settling, or stages are still queued.
    pub fn is_active(&self) -> bool {
        self.is_running() || self.preload_wait.is_some() || !self.stages.is_empty()
    }

    fn pump(&mut self) {
        loop {
            if matches!(
                self.state,
                LifecycleState::Errored | LifecycleState::Updating
            ) {
                return;
            }
            if self.preload_wait.is_some() {
                self.poll_preload();
                if self.preload_wait.is_some() || self.state == LifecycleState::Errored {
                    return;
                }
                continue;
            }
            let Some(stage) = self.stages.pop_front() else {
                return;
            };
            match stage {
                Stage::Preload(producer) => self.begin_preload(producer),
                Stage::Load(producer) => self.run_load(producer),
                Stage::Update(producer) => {
                    self.state = LifecycleState::Updating;
                    self.update_fn = Some(producer);
                    self.running = true;
                    log::debug!("update stage armed, frame loop running");
                }
            }
        }
    }

    fn begin_preload(&mut self, producer: PreloadFn) {
        self.state = LifecycleState::Preloading;
        let assets = producer();
        if assets.is_empty() {
            self.fail_chain(EngineError::EmptyAssetList);
            return;
        }
        let mut pending = FxHashSet::default();
        for asset in &assets {
            let kind = match asset {
                Asset::Sprite(_) => AssetKind::Sprite,
                Asset::Audio(_) => AssetKind::Audio,
            };
            pending.insert(asset.name().to_string());
            self.loader
                .request(kind, asset.name(), asset.source(), self.signal_tx.clone());
        }
        log::debug!("preload dispatched {} asset requests", pending.len());
        self.preload_wait = Some(PreloadWait {
            pending,
            staged: assets,
        });
        // Eager loaders settle synchronously; pick those signals up now.
        self.poll_preload();
    }

    /// Drain settle signals. First failure wins and fails the whole chain;
    /// when the last pending asset settles the staged records are committed
    /// to their registries.
    fn poll_preload(&mut self) {
        let mut failure: Option<(String, String)> = None;
        match self.preload_wait.as_mut() {
            Some(wait) => {
                while let Ok(signal) = self.signal_rx.try_recv() {
                    if !wait.pending.remove(&signal.name) {
                        continue; // stale signal from a previous chain
                    }
                    if let Err(reason) = signal.outcome {
                        failure = Some((signal.name, reason));
                        break;
                    }
                }
            }
            None => return,
        }

        if let Some((name, reason)) = failure {
            self.preload_wait = None;
            self.fail_chain(EngineError::AssetLoad { name, reason });
            return;
        }

        let settled = self
            .preload_wait
            .as_ref()
            .is_some_and(|wait| wait.pending.is_empty());
        if settled {
            let Some(wait) = self.preload_wait.take() else {
                return;
            };
            let count = wait.staged.len();
            for asset in wait.staged {
                match asset {
                    Asset::Sprite(sprite) => self.sprites.insert(sprite.name.clone(), sprite),
                    Asset::Audio(clip) => self.audios.insert(clip.name.clone(), clip),
                }
            }
            log::debug!("preload complete, {} assets registered", count);
        }
    }

    fn run_load(&mut self, producer: LoadFn) {
        self.state = LifecycleState::Loading;
        let items = {
            let mut assets = Assets {
                sprites: &self.sprites,
                audios: &self.audios,
                notices: &mut self.notices,
            };
            producer(&mut assets)
        };
        let count = items.len();
        for item in items {
            match item {
                WorldItem::Object(obj) => self.objects.insert(obj.name.clone(), obj),
                WorldItem::Map(map) => self.maps.insert(map.name.clone(), map),
                WorldItem::Camera(camera) => self.cameras.insert(camera.name.clone(), camera),
            }
        }
        log::debug!("load complete, {} world items registered", count);
    }

    fn fail_chain(&mut self, err: EngineError) {
        log::error!("lifecycle chain failed: {}", err);
        self.state = LifecycleState::Errored;
        self.chain_error = Some(err);
        self.stages.clear();
        self.update_fn = None;
        self.running = false;
    }

    /// One frame of the loop: camera passes, region clears, input poll,
    /// user callback, timestamp bookkeeping.
    fn tick(&mut self, timestamp: f64) {
        if self.state != LifecycleState::Updating {
            // end() or an error raced the scheduled tick.
            self.running = false;
            return;
        }

        // 1. Camera viewports, stretch-fit onto the full surface.
        let (width, height) = self.surface.dimensions();
        let dest = Rect::new(0.0, 0.0, width as f32, height as f32);
        for name in self.cameras.sorted_names() {
            let Some(camera) = self.cameras.get(&name) else {
                continue;
            };
            match self.maps.get(&camera.map) {
                Some(map) => self
                    .surface
                    .draw_image_region(&map.source, camera.viewport, dest),
                None => self.notices.warn_once(NoticeCode::MissingMap, &camera.map),
            }
        }

        // 2. Erase every object's current region before the user draws anew.
        let scale = self.settings.scale;
        for name in self.objects.sorted_names() {
            if let Some(obj) = self.objects.get(&name) {
                self.surface.clear_rect(obj.scaled_region(scale));
            }
        }

        // 3. Fold pending key edges into the keyboard.
        if let (Some(source), Some(keyboard)) =
            (self.key_source.as_mut(), self.keyboard.as_mut())
        {
            keyboard.begin_tick();
            for event in source.poll() {
                keyboard.apply(&event);
            }
        }

        // 4. Elapsed time and the user callback.
        let delta = self.time.advance(timestamp);
        if let Some(mut update) = self.update_fn.take() {
            let mut ctx = FrameContext {
                sprites: &mut self.sprites,
                audios: &mut self.audios,
                objects: &mut self.objects,
                maps: &mut self.maps,
                cameras: &mut self.cameras,
                surface: &mut self.surface,
                notices: &mut self.notices,
                run_once_keys: &mut self.run_once_keys,
                keyboard: self.keyboard.as_ref(),
                settings: self.settings,
                running: true,
            };
            update(&mut ctx, delta);
            let keep_running = ctx.running;
            self.update_fn = Some(update);
            if !keep_running {
                self.pause();
            }
        }
        // 5. Next-tick scheduling belongs to the tick source; a pause above
        //    makes run() stop before asking for another frame.
    }

    // ------------------------------------------------------------------
    // Loop control
    // ------------------------------------------------------------------

    /// Stop the frame loop without clearing registries. Idempotent.
    pub fn pause(&mut self) {
        if self.state == LifecycleState::Updating {
            self.state = LifecycleState::Unset;
            self.running = false;
            log::debug!("frame loop paused");
        }
    }

    /// Restart a paused frame loop. Idempotent; does nothing before the
    /// update stage armed or after an error.
    pub fn resume(&mut self) {
        if self.update_fn.is_some() && !self.running && self.state != LifecycleState::Errored {
            self.state = LifecycleState::Updating;
            self.running = true;
            log::debug!("frame loop resumed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Updating && self.running
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Disable notices, stop the loop, detach input, clear every registry
    /// and dedupe set. The façade stays usable.
    pub fn end(&mut self) {
        self.notices.disable();
        self.pause();
        self.key_source = None;
        self.keyboard = None;
        self.sprites.clear();
        self.audios.clear();
        self.objects.clear();
        self.maps.clear();
        self.cameras.clear();
        self.run_once_keys.clear();
        self.notices.clear();
        self.stages.clear();
        self.update_fn = None;
        self.preload_wait = None;
        self.chain_error = None;
        self.state = LifecycleState::Unset;
        self.time = FrameTime::default();
        log::info!("engine ended, registries cleared");
    }

    /// The failure that moved the lifecycle to `Errored`, if any.
    pub fn chain_error(&self) -> Option<&EngineError> {
        self.chain_error.as_ref()
    }

    // ------------------------------------------------------------------
    // Utilities
    // ------------------------------------------------------------------

    /// Remove an object by name, erasing its last-drawn region. Absent
    /// names are a no-op.
    pub fn remove_object(&mut self, name: &str) {
        if let Some(obj) = self.objects.remove(name) {
            let region = obj.scaled_region(self.settings.scale);
            self.surface.clear_rect(region);
            self.notices.info(NoticeCode::ObjectRemoved, name);
        }
    }

    /// Clone `count` instances of a registered template object, named
    /// `<template>-1 ..= <template>-count`. Names that already exist are
    /// skipped, not errors. Returns the names actually registered.
    pub fn instantiate(&mut self, template: &str, count: u32) -> Vec<String> {
        let Some(tpl) = self.objects.get(template) else {
            self.notices.warn_once(NoticeCode::MissingObject, template);
            return Vec::new();
        };
        let tpl = tpl.clone();
        let mut created = Vec::new();
        for i in 1..=count {
            let name = format!("{}-{}", template, i);
            if self.objects.contains(&name) {
                self.notices.warn_once(NoticeCode::DuplicateName, &name);
                continue;
            }
            self.objects.insert(name.clone(), tpl.instance(&name));
            created.push(name);
        }
        if let Some(tpl) = self.objects.get_mut(template) {
            tpl.instances += created.len() as u32;
        }
        created
    }

    /// AABB collision test between two registered objects. False unless
    /// both carry a collider; boundaries are inclusive.
    pub fn colliding(&self, a: &str, b: &str) -> bool {
        let (Some(a), Some(b)) = (self.objects.get(a), self.objects.get(b)) else {
            return false;
        };
        match (&a.collider, &b.collider) {
            (Some(ca), Some(cb)) => ca.overlaps(a.position, cb, b.position),
            _ => false,
        }
    }

    /// Whether the object's scaled bounding box lies fully outside the
    /// rectangle `[0, W·threshold] × [0, H·threshold]`. The lower bound is
    /// always 0. When out of bounds, runs `on_outbound` if given, else
    /// pauses the loop.
    pub fn outbound(
        &mut self,
        name: &str,
        threshold: f32,
        on_outbound: Option<&mut dyn FnMut()>,
    ) -> bool {
        let region = match self.objects.get(name) {
            Some(obj) => obj.scaled_region(self.settings.scale),
            None => {
                self.notices.warn_once(NoticeCode::MissingObject, name);
                return false;
            }
        };
        let (width, height) = self.surface.dimensions();
        let max_x = width as f32 * threshold;
        let max_y = height as f32 * threshold;
        let out = region.right() < 0.0
            || region.x > max_x
            || region.bottom() < 0.0
            || region.y > max_y;
        if out {
            match on_outbound {
                Some(callback) => callback(),
                None => self.pause(),
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Attach a key source and initialize the keyboard.
    pub fn use_keyboard(&mut self, source: Box<dyn KeySource>) -> &mut Self {
        self.key_source = Some(source);
        if self.keyboard.is_none() {
            self.keyboard = Some(Keyboard::new());
        }
        self
    }

    /// Keyboard state; fails before [`Self::use_keyboard`].
    pub fn keyboard(&self) -> Result<&Keyboard, EngineError> {
        self.keyboard
            .as_ref()
            .ok_or(EngineError::KeyboardNotInitialized)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn scale(&self) -> f32 {
        self.settings.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.settings.scale = scale;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.settings.mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.settings.mode = mode;
    }

    pub fn smoothing_quality(&self) -> SmoothingQuality {
        self.settings.quality
    }

    /// Set the smoothing quality; only valid while the render mode is
    /// smooth.
    pub fn set_smoothing_quality(&mut self, quality: SmoothingQuality) -> Result<(), EngineError> {
        if self.settings.mode != RenderMode::Smooth {
            return Err(EngineError::InvalidMode);
        }
        self.settings.quality = quality;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Registry and surface access
    // ------------------------------------------------------------------

    pub fn sprites(&self) -> &Store<Sprite> {
        &self.sprites
    }

    pub fn audios(&self) -> &Store<AudioClip> {
        &self.audios
    }

    pub fn objects(&self) -> &Store<GameObject> {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut Store<GameObject> {
        &mut self.objects
    }

    pub fn maps(&self) -> &Store<Map> {
        &self.maps
    }

    pub fn cameras(&self) -> &Store<Camera> {
        &self.cameras
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn frame_time(&self) -> &FrameTime {
        &self.time
    }

    /// Whether a miss notice has been recorded for a subject. Test hook.
    pub fn has_notice(&self, code: NoticeCode, subject: &str) -> bool {
        self.notices.has_seen(code, subject)
    }
}
