use backdrop_core::{Rect, Rgba, Surface};
use glam::Vec2;

use crate::RenderError;

/// RGBA software canvas with source-over blending.
///
/// Pixels are stored premultiplied; sampling happens at pixel centres.
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl RasterSurface {
    pub const MAX_DIMENSION: u32 = 8_192;

    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![[0.0; 4]; (width * height) as usize],
        })
    }

    /// Straight-alpha colour of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[(y * self.width + x) as usize];
        if a <= 0.0 {
            return Some(Rgba::TRANSPARENT);
        }
        Some(Rgba::new(r / a, g / a, b / a, a))
    }

    /// Flattens the canvas onto an opaque background as packed RGB bytes.
    pub fn composite_rgb8(&self, background: Rgba) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for [r, g, b, a] in &self.pixels {
            let keep = 1.0 - a;
            let flat = Rgba::new(r + background.r * keep, g + background.g * keep, b + background.b * keep, 1.0);
            let [r8, g8, b8, _] = flat.to_rgba8();
            bytes.extend_from_slice(&[r8, g8, b8]);
        }
        bytes
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba, alpha: f32) {
        let a = (color.a * alpha).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let keep = 1.0 - a;
        let dst = &mut self.pixels[(y * self.width + x) as usize];
        dst[0] = color.r * a + dst[0] * keep;
        dst[1] = color.g * a + dst[1] * keep;
        dst[2] = color.b * a + dst[2] * keep;
        dst[3] = a + dst[3] * keep;
    }

    /// Blends `color` into every pixel of the box whose centre gets a
    /// positive coverage.
    fn shade(&mut self, min: Vec2, max: Vec2, color: Rgba, alpha: f32, coverage: impl Fn(Vec2) -> f32) {
        let (x0, x1) = span(min.x, max.x, self.width);
        let (y0, y1) = span(min.y, max.y, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let c = coverage(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                if c > 0.0 {
                    self.blend(x, y, color, alpha * c.min(1.0));
                }
            }
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), RenderError> {
    let max = RasterSurface::MAX_DIMENSION;
    if width == 0 || height == 0 || width > max || height > max {
        return Err(RenderError::Dimensions { width, height });
    }
    Ok(())
}

/// Pixel index range covering `[lo, hi]`, clipped to `[0, extent)`.
fn span(lo: f32, hi: f32, extent: u32) -> (u32, u32) {
    let limit = extent as f32;
    (lo.floor().clamp(0.0, limit) as u32, hi.ceil().clamp(0.0, limit) as u32)
}

fn segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len2).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Antialiased edge: 1 well inside, 0 outside, linear over one pixel.
fn edge(inside_by: f32) -> f32 {
    (inside_by + 0.5).clamp(0.0, 1.0)
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    /// Clamps to `1..=MAX_DIMENSION` on each axis; a collapsed window keeps a
    /// one-pixel canvas so frames can still be encoded.
    fn resize(&mut self, width: u32, height: u32) {
        let max = Self::MAX_DIMENSION;
        let (width, height) = (width.clamp(1, max), height.clamp(1, max));
        if (width, height) == (self.width, self.height) {
            self.clear();
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 4]; (width * height) as usize];
    }

    fn fill_glow(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        self.shade(center - reach, center + reach, color, alpha, |p| {
            let d = p.distance(center);
            edge(radius - d) * (1.0 - d / (2.0 * radius)).max(0.0)
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        self.shade(center - reach, center + reach, color, alpha, |p| edge(radius - p.distance(center)));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba, alpha: f32) {
        let half = width / 2.0;
        let reach = Vec2::splat(half + 1.0);
        self.shade(from.min(to) - reach, from.max(to) + reach, color, alpha, |p| {
            edge(half - segment_distance(p, from, to))
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba, alpha: f32) {
        let min = Vec2::new(rect.x, rect.y);
        let max = min + Vec2::new(rect.width, rect.height);
        self.shade(min, max, color, alpha, |p| if rect.contains(p) { 1.0 } else { 0.0 });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba, alpha: f32) {
        let half = width / 2.0;
        let outer = Rect::new(rect.x - half, rect.y - half, rect.width + width, rect.height + width);
        let inner = Rect::new(rect.x + half, rect.y + half, rect.width - width, rect.height - width);
        let min = Vec2::new(outer.x, outer.y);
        let max = min + Vec2::new(outer.width, outer.height);
        self.shade(min, max, color, alpha, |p| {
            if outer.contains(p) && !inner.contains(p) { 1.0 } else { 0.0 }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(matches!(RasterSurface::new(0, 10), Err(RenderError::Dimensions { .. })));
        assert!(matches!(RasterSurface::new(10, 20_000), Err(RenderError::Dimensions { .. })));
        assert!(RasterSurface::new(4, 4).is_ok());
    }

    #[test]
    fn starts_transparent_and_clears() {
        let mut raster = RasterSurface::new(8, 8).unwrap();
        assert_eq!(raster.pixel(3, 3), Some(Rgba::TRANSPARENT));

        raster.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba::BLUE, 1.0);
        raster.clear();
        assert_eq!(raster.pixel(3, 3), Some(Rgba::TRANSPARENT));
        assert_eq!(raster.pixel(8, 0), None);
    }

    #[test]
    fn opaque_rect_covers_only_its_pixels() {
        let mut raster = RasterSurface::new(10, 10).unwrap();
        raster.fill_rect(Rect::new(2.0, 2.0, 3.0, 3.0), Rgba::YELLOW, 1.0);

        assert_eq!(raster.pixel(3, 3).unwrap().to_rgba8(), Rgba::YELLOW.to_rgba8());
        assert_eq!(raster.pixel(5, 3), Some(Rgba::TRANSPARENT));
        assert_eq!(raster.pixel(1, 1), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn source_over_blending() {
        let mut raster = RasterSurface::new(1, 1).unwrap();
        let full = Rect::new(0.0, 0.0, 1.0, 1.0);
        raster.fill_rect(full, Rgba::new(0.0, 0.0, 1.0, 1.0), 1.0);
        raster.fill_rect(full, Rgba::new(1.0, 0.0, 0.0, 1.0), 0.5);

        let pixel = raster.pixel(0, 0).unwrap();
        assert!(close(pixel.r, 0.5));
        assert!(close(pixel.b, 0.5));
        assert!(close(pixel.a, 1.0));
    }

    #[test]
    fn glow_fades_outward_and_stops_at_radius() {
        let mut raster = RasterSurface::new(40, 40).unwrap();
        raster.fill_glow(Vec2::new(20.0, 20.0), 10.0, Rgba::WHITE, 1.0);

        let center = raster.pixel(20, 20).unwrap().a;
        let near_edge = raster.pixel(27, 20).unwrap().a;
        assert!(center > near_edge);
        assert!(near_edge > 0.0);
        assert_eq!(raster.pixel(35, 20), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn line_touches_pixels_along_its_path() {
        let mut raster = RasterSurface::new(20, 5).unwrap();
        raster.stroke_line(Vec2::new(0.0, 2.5), Vec2::new(20.0, 2.5), 1.0, Rgba::CYAN, 1.0);

        assert!(raster.pixel(10, 2).unwrap().a > 0.9);
        assert_eq!(raster.pixel(10, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn outline_leaves_the_interior_empty() {
        let mut raster = RasterSurface::new(20, 20).unwrap();
        raster.stroke_rect(Rect::new(4.0, 4.0, 12.0, 12.0), 2.0, Rgba::BLUE, 1.0);

        assert!(raster.pixel(4, 10).unwrap().a > 0.99);
        assert_eq!(raster.pixel(10, 10), Some(Rgba::TRANSPARENT));
        assert_eq!(raster.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn drawing_off_canvas_is_clipped() {
        let mut raster = RasterSurface::new(10, 10).unwrap();
        raster.fill_circle(Vec2::new(-50.0, -50.0), 5.0, Rgba::RED, 1.0);
        raster.stroke_line(Vec2::new(-5.0, -5.0), Vec2::new(15.0, 15.0), 2.0, Rgba::RED, 1.0);
        raster.fill_rect(Rect::new(8.0, 8.0, 100.0, 100.0), Rgba::RED, 1.0);

        assert!(raster.pixel(9, 9).unwrap().a > 0.99);
    }

    #[test]
    fn composite_uses_background_where_empty() {
        let mut raster = RasterSurface::new(2, 1).unwrap();
        raster.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::BLUE, 1.0);

        let bytes = raster.composite_rgb8(Rgba::WHITE);
        assert_eq!(bytes, vec![0x12, 0x41, 0x91, 255, 255, 255]);
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut raster = RasterSurface::new(4, 4).unwrap();
        raster.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba::BLUE, 1.0);
        raster.resize(6, 3);

        assert_eq!((raster.width(), raster.height()), (6, 3));
        assert_eq!(raster.pixel(5, 2), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn resize_keeps_at_least_one_pixel_and_caps_size() {
        let mut raster = RasterSurface::new(4, 4).unwrap();
        raster.resize(0, 0);
        assert_eq!((raster.width(), raster.height()), (1, 1));
        assert_eq!(raster.composite_rgb8(Rgba::WHITE).len(), 3);

        raster.resize(100_000, 2);
        assert_eq!((raster.width(), raster.height()), (RasterSurface::MAX_DIMENSION, 2));
    }
}
