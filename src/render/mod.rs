//! Rendering seam and transform pipeline.
//!
//! The engine draws through the [`Surface`] trait; a windowed host supplies
//! a real implementation, tests and the headless demo use
//! [`RecordingSurface`](recording::RecordingSurface).

pub mod pipeline;
pub mod recording;
pub mod surface;

pub use surface::Surface;

/// Global rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Interpolated sampling, quality selectable.
    #[default]
    Smooth,
    /// Nearest-neighbour sampling for a crisp look.
    Pixelated,
}

/// Interpolation quality used while the mode is [`RenderMode::Smooth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingQuality {
    #[default]
    Low,
    Medium,
    High,
}

/// Smoothing state applied to the surface before each draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Smoothing {
    Off,
    On(SmoothingQuality),
}

/// Per-engine render settings snapshot handed to the draw pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    /// Global scale factor applied to positions and sizes.
    pub scale: f32,
    pub mode: RenderMode,
    pub quality: SmoothingQuality,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            scale: 1.0,
            mode: RenderMode::default(),
            quality: SmoothingQuality::default(),
        }
    }
}

impl RenderSettings {
    pub fn smoothing(&self) -> Smoothing {
        match self.mode {
            RenderMode::Smooth => Smoothing::On(self.quality),
            RenderMode::Pixelated => Smoothing::Off,
        }
    }
}
