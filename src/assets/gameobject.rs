//! Game object record.

use crate::assets::boxcollider::BoxCollider;
use crate::assets::sprite::Sprite;
use crate::math::{Rect, Vec2};

/// An active entity: a named sprite placed in the world.
///
/// The name must be unique among registered objects. The object owns its
/// sprite; instancing clones the sprite so instances mutate independently.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub name: String,
    pub sprite: Sprite,
    pub position: Vec2,
    pub size: Vec2,
    /// Absent collider disables collision checks for this object.
    pub collider: Option<BoxCollider>,
    /// Draw-order ordinal; lower layers draw first.
    pub layer: i32,
    /// Number of instances created from this object as a template.
    pub instances: u32,
}

impl GameObject {
    /// Create an object from a sprite, inheriting the sprite's position and
    /// size as the starting world placement.
    pub fn new(name: impl Into<String>, sprite: Sprite) -> Self {
        let position = sprite.position;
        let size = sprite.size;
        GameObject {
            name: name.into(),
            sprite,
            position,
            size,
            collider: None,
            layer: 0,
            instances: 0,
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

    pub fn with_collider(mut self, collider: BoxCollider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Region this object occupies on the surface under a global scale.
    pub fn scaled_region(&self, scale: f32) -> Rect {
        Rect::from_corner(self.position.scaled(scale), self.size.scaled(scale))
    }

    /// Clone into an instance under a derived name. The sprite is cloned
    /// too, so instances do not share transform state.
    pub fn instance(&self, name: impl Into<String>) -> GameObject {
        let mut clone = self.clone();
        clone.name = name.into();
        clone.instances = 0;
        clone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite() -> Sprite {
        Sprite::new("ship", "assets/ship.png")
            .with_position(10.0, 20.0)
            .with_size(32.0, 16.0)
    }

    #[test]
    fn object_inherits_sprite_placement() {
        let obj = GameObject::new("player", sprite());
        assert_eq!(obj.position, Vec2::new(10.0, 20.0));
        assert_eq!(obj.size, Vec2::new(32.0, 16.0));
        assert!(obj.collider.is_none());
    }

    #[test]
    fn scaled_region_applies_global_scale() {
        let obj = GameObject::new("player", sprite());
        let region = obj.scaled_region(2.0);
        assert_eq!(region, Rect::new(20.0, 40.0, 64.0, 32.0));
    }

    #[test]
    fn instances_do_not_share_sprite_state() {
        let template = GameObject::new("drone", sprite());
        let mut a = template.instance("drone-1");
        let b = template.instance("drone-2");
        a.sprite.rotation = 45.0;
        assert_eq!(b.sprite.rotation, 0.0);
        assert_eq!(template.sprite.rotation, 0.0);
    }
}
