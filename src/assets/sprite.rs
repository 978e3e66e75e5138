//! Sprite asset record.

use crate::math::Vec2;

/// A drawable image resource with its visual transform fields.
///
/// Identity (`name`, `source`) is fixed at creation; the transform fields
/// (position, size, rotation, skew, flips) are mutable and travel with the
/// sprite when it is cloned into instanced game objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub name: String,
    /// Resource reference resolved by the loader and the surface.
    pub source: String,
    pub position: Vec2,
    pub size: Vec2,
    /// Rotation in degrees around the visual centre.
    pub rotation: f32,
    /// Skew angles in degrees, per axis.
    pub skew: Vec2,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Sprite {
            name: name.into(),
            source: source.into(),
            position: Vec2::zero(),
            size: Vec2::zero(),
            rotation: 0.0,
            skew: Vec2::zero(),
            flip_h: false,
            flip_v: false,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_skew(mut self, x_degrees: f32, y_degrees: f32) -> Self {
        self.skew = Vec2::new(x_degrees, y_degrees);
        self
    }

    pub fn with_flip(mut self, horizontal: bool, vertical: bool) -> Self {
        self.flip_h = horizontal;
        self.flip_v = vertical;
        self
    }

    /// Sentinel returned by lookup misses; draws nothing and loads nothing.
    pub fn empty() -> Self {
        Sprite::new("", "")
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.source.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_transform_fields() {
        let s = Sprite::new("ship", "assets/ship.png")
            .with_position(10.0, 20.0)
            .with_size(32.0, 16.0)
            .with_rotation(90.0)
            .with_flip(true, false);
        assert_eq!(s.position, Vec2::new(10.0, 20.0));
        assert_eq!(s.size, Vec2::new(32.0, 16.0));
        assert_eq!(s.rotation, 90.0);
        assert!(s.flip_h);
        assert!(!s.flip_v);
    }

    #[test]
    fn empty_sentinel_is_recognisable() {
        assert!(Sprite::empty().is_empty());
        assert!(!Sprite::new("x", "y").is_empty());
    }
}
