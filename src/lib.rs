//! Overture 2D engine library.
//!
//! A small 2D engine core built around a staged lifecycle: preload assets,
//! load world items, then run an update/render loop. The engine owns
//! name-keyed registries for sprites, audio clips, game objects, maps and
//! cameras, draws through an abstract surface with full transform support
//! (scale, flip, rotate, skew), and ships helper utilities for collision
//! testing, keyboard polling, bounds checking and instancing.
//!
//! Platform concerns stay behind injected seams: a host supplies the
//! [`Surface`](render::Surface), an [`AssetLoader`](assets::loader::AssetLoader),
//! a [`KeySource`](input::KeySource) and a
//! [`TickSource`](engine::frameloop::TickSource). Substituting the recording
//! surface and a manual tick source makes every behaviour deterministic
//! under test.

pub mod assets;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod math;
pub mod notices;
pub mod registry;
pub mod render;

pub use assets::{Asset, WorldItem};
pub use config::EngineConfig;
pub use engine::Engine;
pub use engine::lifecycle::LifecycleState;
pub use error::EngineError;
