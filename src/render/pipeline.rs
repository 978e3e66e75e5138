//! Fixed-order transform pipeline for drawing game objects.

use crate::assets::gameobject::GameObject;
use crate::math::Rect;
use crate::render::{RenderSettings, Surface};

/// Draw one object with the full transform pipeline.
///
/// Order is fixed: translate (with a flip offset of size × scale on each
/// flipped axis), mirror-scale, then an optional centre translation for
/// rotation and/or skew so both pivot on the object's visual centre. The
/// whole sequence is bracketed by save/restore and preceded by the global
/// smoothing setting.
pub fn draw_object(surface: &mut dyn Surface, obj: &GameObject, settings: &RenderSettings) {
    let s = settings.scale;
    let sprite = &obj.sprite;

    surface.save();
    surface.set_smoothing(settings.smoothing());

    let tx = obj.position.x * s + if sprite.flip_h { obj.size.x * s } else { 0.0 };
    let ty = obj.position.y * s + if sprite.flip_v { obj.size.y * s } else { 0.0 };
    surface.translate(tx, ty);
    surface.scale(
        if sprite.flip_h { -s } else { s },
        if sprite.flip_v { -s } else { s },
    );

    let mut centered = false;
    if sprite.rotation != 0.0 {
        surface.translate(obj.size.x / 2.0, obj.size.y / 2.0);
        surface.rotate(sprite.rotation.to_radians());
        centered = true;
    }
    if sprite.skew.x != 0.0 || sprite.skew.y != 0.0 {
        if !centered {
            surface.translate(obj.size.x / 2.0, obj.size.y / 2.0);
            centered = true;
        }
        surface.transform(
            1.0,
            sprite.skew.y.to_radians().tan(),
            sprite.skew.x.to_radians().tan(),
            1.0,
            0.0,
            0.0,
        );
    }

    let dest = if centered {
        Rect::new(-obj.size.x / 2.0, -obj.size.y / 2.0, obj.size.x, obj.size.y)
    } else {
        Rect::new(0.0, 0.0, obj.size.x, obj.size.y)
    };
    surface.draw_image(&sprite.source, dest);

    surface.restore();
}
