//! Camera asset record.

use crate::math::Rect;

/// A named viewport onto a map.
///
/// `map` is a relation by name only; the map registry keeps ownership of the
/// map itself, and a camera whose map has been removed simply stops
/// rendering (with a one-time notice).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: String,
    /// Source rectangle read from the target map's image.
    pub viewport: Rect,
    /// Name of the map this camera reads from.
    pub map: String,
}

impl Camera {
    pub fn new(name: impl Into<String>, map: impl Into<String>, viewport: Rect) -> Self {
        Camera {
            name: name.into(),
            map: map.into(),
            viewport,
        }
    }

    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }
}
