//! Lifecycle state and the stage queue.
//!
//! The lifecycle is strictly monotonic — `Unset` → `Preloading` → `Loading`
//! → `Updating` — except that `pause()` flips `Updating` back to `Unset`
//! without touching registries, and any failure lands in the terminal
//! `Errored` state. Stage producers are queued by the fluent registration
//! calls and executed later by the engine's pump; registration itself never
//! runs stage logic.

use crate::assets::{Asset, WorldItem};
use crate::engine::context::{Assets, FrameContext};

/// Discrete lifecycle states of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Unset,
    Preloading,
    Loading,
    Updating,
    /// Terminal: a stage failed; no further stage will execute.
    Errored,
}

/// Producer invoked once to declare the assets to preload.
pub type PreloadFn = Box<dyn FnOnce() -> Vec<Asset>>;

/// Producer invoked once, after preload settles, to build world items from
/// the preloaded assets.
pub type LoadFn = Box<dyn FnOnce(&mut Assets) -> Vec<WorldItem>>;

/// Per-frame callback, re-invoked every tick with the elapsed seconds.
pub type UpdateFn = Box<dyn FnMut(&mut FrameContext, f32)>;

/// One queued stage continuation.
pub enum Stage {
    Preload(PreloadFn),
    Load(LoadFn),
    Update(UpdateFn),
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Preload(_) => f.write_str("Stage::Preload"),
            Stage::Load(_) => f.write_str("Stage::Load"),
            Stage::Update(_) => f.write_str("Stage::Update"),
        }
    }
}
