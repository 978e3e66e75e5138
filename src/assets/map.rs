//! Map asset record.
//!
//! A map is a named backdrop image that cameras read regions from. Map
//! definitions can be authored as JSON files and loaded with [`Map::from_json`].

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Named backdrop resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub name: String,
    /// Image resource reference resolved by the surface.
    pub source: String,
    /// Full image width in pixels.
    pub width: f32,
    /// Full image height in pixels.
    pub height: f32,
}

impl Map {
    pub fn new(name: impl Into<String>, source: impl Into<String>, width: f32, height: f32) -> Self {
        Map {
            name: name.into(),
            source: source.into(),
            width,
            height,
        }
    }

    /// Parse a map definition from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
