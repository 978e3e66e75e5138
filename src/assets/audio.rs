//! Audio clip asset record.

/// A named audio resource. Playback lives behind the host's media layer;
/// the engine only tracks identity, source and the intent flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub name: String,
    pub source: String,
    pub volume: f32,
    pub looped: bool,
}

impl AudioClip {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        AudioClip {
            name: name.into(),
            source: source.into(),
            volume: 1.0,
            looped: false,
        }
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Sentinel returned by lookup misses.
    pub fn empty() -> Self {
        AudioClip::new("", "")
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.source.is_empty()
    }
}
