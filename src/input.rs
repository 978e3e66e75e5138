//! Keyboard input polled from edge events.
//!
//! The engine does not listen to an OS event queue itself; a host-provided
//! [`KeySource`] delivers discrete press/release events keyed by a symbolic
//! key name ("left", "space", ...). The [`Keyboard`] folds those edges into
//! per-key state that update callbacks poll each tick.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// One press or release edge for a symbolic key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    /// `true` for press, `false` for release.
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(key: impl Into<String>) -> Self {
        KeyEvent {
            key: key.into(),
            pressed: true,
        }
    }

    pub fn release(key: impl Into<String>) -> Self {
        KeyEvent {
            key: key.into(),
            pressed: false,
        }
    }
}

/// Batch of events delivered by one poll. Sized for the common case of a
/// handful of keys changing per frame.
pub type KeyEvents = SmallVec<[KeyEvent; 8]>;

/// Host-side source of key edges, polled once per tick while attached.
pub trait KeySource {
    /// Drain the edges that occurred since the previous poll.
    fn poll(&mut self) -> KeyEvents;
}

/// Boolean key state with edge flags for the current tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    /// Whether the key is currently held down.
    pub active: bool,
    /// Whether the key went down this tick.
    pub just_pressed: bool,
    /// Whether the key went up this tick.
    pub just_released: bool,
}

/// Per-key press state, rebuilt from edges each tick.
#[derive(Debug, Default)]
pub struct Keyboard {
    keys: FxHashMap<String, KeyState>,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard {
            keys: FxHashMap::default(),
        }
    }

    /// Clear the per-tick edge flags. Called before applying a new batch.
    pub fn begin_tick(&mut self) {
        for state in self.keys.values_mut() {
            state.just_pressed = false;
            state.just_released = false;
        }
    }

    /// Fold one edge into the key state. A press edge on an already-held key
    /// does not retrigger `just_pressed`.
    pub fn apply(&mut self, event: &KeyEvent) {
        let state = self.keys.entry(event.key.clone()).or_default();
        if event.pressed {
            if !state.active {
                state.just_pressed = true;
            }
            state.active = true;
        } else {
            if state.active {
                state.just_released = true;
            }
            state.active = false;
        }
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.keys.get(key).map(|s| s.active).unwrap_or(false)
    }

    pub fn just_pressed(&self, key: &str) -> bool {
        self.keys.get(key).map(|s| s.just_pressed).unwrap_or(false)
    }

    pub fn just_released(&self, key: &str) -> bool {
        self.keys.get(key).map(|s| s.just_released).unwrap_or(false)
    }

    /// Drop all key state.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Scripted key source for tests and the headless demo: one pre-recorded
/// batch of edges per poll, empty once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    frames: VecDeque<KeyEvents>,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        ScriptedKeys {
            frames: VecDeque::new(),
        }
    }

    /// Append one tick's worth of edges.
    pub fn push_frame(&mut self, events: impl IntoIterator<Item = KeyEvent>) {
        self.frames.push_back(events.into_iter().collect());
    }
}

impl KeySource for ScriptedKeys {
    fn poll(&mut self) -> KeyEvents {
        self.frames.pop_front().unwrap_or_default()
    }
}
