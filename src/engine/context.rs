//! Accessor surfaces handed to stage producers.
//!
//! [`Assets`] is what a load producer sees: read access to the preloaded
//! sprite/audio registries with the sentinel-on-miss contract. A miss is
//! never an error; it returns the empty placeholder instance and logs a
//! coded notice once per name.
//!
//! [`FrameContext`] is the control surface passed to the update callback
//! every tick: registry lookups, immediate draws through the transform
//! pipeline, run-once keys, loop control and keyboard polling.

use rustc_hash::FxHashSet;

use crate::assets::audio::AudioClip;
use crate::assets::camera::Camera;
use crate::assets::gameobject::GameObject;
use crate::assets::map::Map;
use crate::assets::sprite::Sprite;
use crate::error::EngineError;
use crate::input::Keyboard;
use crate::notices::{NoticeCode, Notices};
use crate::registry::Store;
use crate::render::{RenderSettings, Surface, pipeline};

/// Read accessor over preloaded assets, passed to the load producer.
pub struct Assets<'a> {
    pub(crate) sprites: &'a Store<Sprite>,
    pub(crate) audios: &'a Store<AudioClip>,
    pub(crate) notices: &'a mut Notices,
}

impl Assets<'_> {
    /// Fetch a preloaded sprite by name. A miss logs once and returns the
    /// empty sentinel instance; it never fails.
    pub fn sprite(&mut self, name: &str) -> Sprite {
        match self.sprites.get(name) {
            Some(sprite) => sprite.clone(),
            None => {
                self.notices.warn_once(NoticeCode::MissingSprite, name);
                Sprite::empty()
            }
        }
    }

    /// Fetch a preloaded audio clip by name, with the same sentinel-on-miss
    /// contract as [`Self::sprite`].
    pub fn audio(&mut self, name: &str) -> AudioClip {
        match self.audios.get(name) {
            Some(clip) => clip.clone(),
            None => {
                self.notices.warn_once(NoticeCode::MissingAudio, name);
                AudioClip::empty()
            }
        }
    }
}

/// Control surface handed to the update callback each tick.
pub struct FrameContext<'a> {
    pub(crate) sprites: &'a mut Store<Sprite>,
    pub(crate) audios: &'a mut Store<AudioClip>,
    pub(crate) objects: &'a mut Store<GameObject>,
    pub(crate) maps: &'a mut Store<Map>,
    pub(crate) cameras: &'a mut Store<Camera>,
    pub(crate) surface: &'a mut (dyn Surface + 'a),
    pub(crate) notices: &'a mut Notices,
    pub(crate) run_once_keys: &'a mut FxHashSet<String>,
    pub(crate) keyboard: Option<&'a Keyboard>,
    pub(crate) settings: RenderSettings,
    pub(crate) running: bool,
}

impl FrameContext<'_> {
    /// Look up a sprite. A miss logs a coded notice once per name.
    pub fn sprite(&mut self, name: &str) -> Option<&mut Sprite> {
        if !self.sprites.contains(name) {
            self.notices.warn_once(NoticeCode::MissingSprite, name);
            return None;
        }
        self.sprites.get_mut(name)
    }

    pub fn audio(&mut self, name: &str) -> Option<&mut AudioClip> {
        if !self.audios.contains(name) {
            self.notices.warn_once(NoticeCode::MissingAudio, name);
            return None;
        }
        self.audios.get_mut(name)
    }

    pub fn object(&mut self, name: &str) -> Option<&mut GameObject> {
        if !self.objects.contains(name) {
            self.notices.warn_once(NoticeCode::MissingObject, name);
            return None;
        }
        self.objects.get_mut(name)
    }

    pub fn map(&mut self, name: &str) -> Option<&mut Map> {
        if !self.maps.contains(name) {
            self.notices.warn_once(NoticeCode::MissingMap, name);
            return None;
        }
        self.maps.get_mut(name)
    }

    pub fn camera(&mut self, name: &str) -> Option<&mut Camera> {
        if !self.cameras.contains(name) {
            self.notices.warn_once(NoticeCode::MissingCamera, name);
            return None;
        }
        self.cameras.get_mut(name)
    }

    /// Draw one object immediately through the transform pipeline.
    pub fn animate(&mut self, obj: &GameObject) {
        pipeline::draw_object(&mut *self.surface, obj, &self.settings);
    }

    /// Look up and draw one registered object.
    pub fn animate_by_name(&mut self, name: &str) {
        if !self.objects.contains(name) {
            self.notices.warn_once(NoticeCode::MissingObject, name);
            return;
        }
        if let Some(obj) = self.objects.get(name) {
            pipeline::draw_object(&mut *self.surface, obj, &self.settings);
        }
    }

    /// Draw several registered objects in ascending layer order.
    pub fn animate_many(&mut self, names: &[&str]) {
        let mut ordered: Vec<(i32, &str)> = Vec::with_capacity(names.len());
        for name in names {
            match self.objects.get(*name) {
                Some(obj) => ordered.push((obj.layer, *name)),
                None => self.notices.warn_once(NoticeCode::MissingObject, name),
            }
        }
        ordered.sort_by_key(|(layer, _)| *layer);
        for (_, name) in ordered {
            if let Some(obj) = self.objects.get(name) {
                pipeline::draw_object(&mut *self.surface, obj, &self.settings);
            }
        }
    }

    /// Execute `f` only the first time `key` is seen across the session.
    pub fn run_once(&mut self, key: &str, f: impl FnOnce(&mut Self)) {
        if self.run_once_keys.insert(key.to_string()) {
            f(self);
        }
    }

    /// Stop the frame loop after this tick. Idempotent.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Keep (or restart) the frame loop after this tick. Idempotent.
    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Keyboard state for this tick; fails before `use_keyboard()`.
    pub fn keyboard(&self) -> Result<&Keyboard, EngineError> {
        self.keyboard.ok_or(EngineError::KeyboardNotInitialized)
    }

    pub fn surface_dimensions(&self) -> (u32, u32) {
        self.surface.dimensions()
    }

    pub fn scale(&self) -> f32 {
        self.settings.scale
    }
}
