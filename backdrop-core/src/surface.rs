use glam::Vec2;

use crate::color::Rgba;
use crate::geometry::Rect;

/// A 2D raster target the render step draws into.
///
/// `alpha` arguments are a global opacity multiplied into the colour's own
/// alpha, mirroring a canvas context's `globalAlpha`.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resets every pixel to transparent.
    fn clear(&mut self);

    /// Resizes the backing store; implies `clear`.
    fn resize(&mut self, width: u32, height: u32);

    /// Disc of `radius` filled with a radial gradient from `color` at the
    /// centre to fully transparent at `2 * radius`.
    fn fill_glow(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba, alpha: f32);

    fn fill_rect(&mut self, rect: Rect, color: Rgba, alpha: f32);

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba, alpha: f32);
}
