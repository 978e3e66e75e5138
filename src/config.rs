//! Engine configuration.
//!
//! Settings loaded from an INI file with safe defaults for startup. Missing
//! values keep their defaults, so a partial file is fine.
//!
//! # Configuration File Format
//!
//! ```ini
//! [surface]
//! width = 320
//! height = 240
//! scale = 1.0
//!
//! [render]
//! mode = smooth
//! quality = high
//!
//! [loop]
//! target_fps = 60
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::render::{RenderMode, SmoothingQuality};

/// Default safe values for startup
const DEFAULT_SURFACE_WIDTH: u32 = 320;
const DEFAULT_SURFACE_HEIGHT: u32 = 240;
const DEFAULT_SCALE: f32 = 1.0;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./engine.ini";

/// Engine configuration.
///
/// Stores surface dimensions, the global scale factor, render mode and
/// smoothing quality, and the demo loop's target frame rate.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Surface width in pixels.
    pub surface_width: u32,
    /// Surface height in pixels.
    pub surface_height: u32,
    /// Global scale factor applied to positions and sizes at draw time.
    pub scale: f32,
    /// Initial render mode.
    pub render_mode: RenderMode,
    /// Initial smoothing quality (used while the mode is smooth).
    pub quality: SmoothingQuality,
    /// Target frames per second for paced tick sources.
    pub target_fps: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            scale: DEFAULT_SCALE,
            render_mode: RenderMode::default(),
            quality: SmoothingQuality::default(),
            target_fps: DEFAULT_TARGET_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Convenience constructor for the common width/height case.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            surface_width: width,
            surface_height: height,
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [surface] section
        if let Some(width) = config.getuint("surface", "width").ok().flatten() {
            self.surface_width = width as u32;
        }
        if let Some(height) = config.getuint("surface", "height").ok().flatten() {
            self.surface_height = height as u32;
        }
        if let Some(scale) = config.getfloat("surface", "scale").ok().flatten() {
            self.scale = scale as f32;
        }

        // [render] section
        if let Some(mode) = config.get("render", "mode") {
            match mode.as_str() {
                "smooth" => self.render_mode = RenderMode::Smooth,
                "pixelated" => self.render_mode = RenderMode::Pixelated,
                other => log::warn!("unknown render mode '{}', keeping default", other),
            }
        }
        if let Some(quality) = config.get("render", "quality") {
            match quality.as_str() {
                "low" => self.quality = SmoothingQuality::Low,
                "medium" => self.quality = SmoothingQuality::Medium,
                "high" => self.quality = SmoothingQuality::High,
                other => log::warn!("unknown smoothing quality '{}', keeping default", other),
            }
        }

        // [loop] section
        if let Some(fps) = config.getuint("loop", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        info!(
            "Loaded config: {}x{} surface, scale={}, mode={:?}, quality={:?}, fps={}",
            self.surface_width,
            self.surface_height,
            self.scale,
            self.render_mode,
            self.quality,
            self.target_fps
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("surface", "width", Some(self.surface_width.to_string()));
        config.set("surface", "height", Some(self.surface_height.to_string()));
        config.set("surface", "scale", Some(self.scale.to_string()));

        let mode = match self.render_mode {
            RenderMode::Smooth => "smooth",
            RenderMode::Pixelated => "pixelated",
        };
        config.set("render", "mode", Some(mode.to_string()));
        let quality = match self.quality {
            SmoothingQuality::Low => "low",
            SmoothingQuality::Medium => "medium",
            SmoothingQuality::High => "high",
        };
        config.set("render", "quality", Some(quality.to_string()));

        config.set("loop", "target_fps", Some(self.target_fps.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Surface size as a pair.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_width, self.surface_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_safe() {
        let config = EngineConfig::new();
        assert_eq!(config.surface_size(), (320, 240));
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.render_mode, RenderMode::Smooth);
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let path = std::env::temp_dir().join("overture2d-config-test.ini");
        let mut config = EngineConfig::with_path(&path);
        config.surface_width = 640;
        config.surface_height = 360;
        config.scale = 2.0;
        config.render_mode = RenderMode::Pixelated;
        config.save_to_file().expect("save");

        let mut loaded = EngineConfig::with_path(&path);
        loaded.load_from_file().expect("load");
        assert_eq!(loaded.surface_size(), (640, 360));
        assert_eq!(loaded.scale, 2.0);
        assert_eq!(loaded.render_mode, RenderMode::Pixelated);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_error_and_keeps_defaults() {
        let mut config = EngineConfig::with_path("/nonexistent/overture2d.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.surface_size(), (320, 240));
    }
}
