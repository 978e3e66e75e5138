//! Axis-aligned box collider.

use crate::math::{Rect, Vec2};

/// Rectangular collision volume attached to a game object.
///
/// The box is positioned relative to the owning object: world AABB =
/// object position + `offset`, extended by `size`. An object without a
/// collider never collides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a collider with the given size and no offset.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::zero(),
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// World-space AABB for a given owner position. Negative sizes are
    /// normalised to a proper min/max rectangle.
    pub fn aabb(&self, position: Vec2) -> Rect {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        let min = Vec2::new(p0.x.min(p1.x), p0.y.min(p1.y));
        let max = Vec2::new(p0.x.max(p1.x), p0.y.max(p1.y));
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Overlap test against another collider at a different owner position.
    /// Boundaries are inclusive: boxes touching exactly at an edge collide.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        self.aabb(position)
            .overlaps_inclusive(&other.aabb(other_position))
    }
}
