//! Drawing surface collaborator contract.

use crate::math::Rect;
use crate::render::Smoothing;

/// Abstract 2D drawing surface.
///
/// The host owns the actual pixels (a window framebuffer, a texture, an
/// off-screen buffer) and resolves image `source` references to its own
/// decoded resources. The engine only issues drawing commands.
///
/// Transform state is a stack: `save`/`restore` must bracket any transform
/// changes so one object's transform cannot leak into the next.
pub trait Surface {
    /// Surface extent in pixels.
    fn dimensions(&self) -> (u32, u32);

    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);
    /// Rotate the current transform by `radians`.
    fn rotate(&mut self, radians: f32);
    /// Multiply the current transform by the matrix
    /// `[a c e; b d f; 0 0 1]` (column-major 2D affine, canvas-style).
    fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32);

    /// Erase a rectangle in surface coordinates.
    fn clear_rect(&mut self, rect: Rect);

    /// Blit the full image identified by `source` into `dest` under the
    /// current transform.
    fn draw_image(&mut self, source: &str, dest: Rect);

    /// Blit the `src` region of the image identified by `source` into
    /// `dest`, stretching as needed.
    fn draw_image_region(&mut self, source: &str, src: Rect, dest: Rect);

    /// Set the sampling mode used by subsequent draws.
    fn set_smoothing(&mut self, smoothing: Smoothing);
}
