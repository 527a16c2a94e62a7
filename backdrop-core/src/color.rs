/// Straight (non-premultiplied) RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    // Brand palette
    pub const BLUE: Rgba = Rgba::from_rgb8(0x12, 0x41, 0x91);
    pub const LIGHT_BLUE: Rgba = Rgba::from_rgb8(0x1e, 0x5b, 0xb8);
    pub const CYAN: Rgba = Rgba::from_rgb8(0x00, 0xd4, 0xff);
    pub const YELLOW: Rgba = Rgba::from_rgb8(0xff, 0xed, 0x00);
    pub const GOLD: Rgba = Rgba::from_rgb8(0xff, 0xd7, 0x00);
    pub const RED: Rgba = Rgba::from_rgb8(0xff, 0x33, 0x33);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Builds an opaque colour from hue (degrees), saturation and lightness
    /// (both in `[0, 1]`).
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        Self::new(r + m, g + m, b + m, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// `#rrggbb` notation, alpha dropped.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries() {
        assert_eq!(Rgba::from_hsl(0.0, 1.0, 0.5).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Rgba::from_hsl(120.0, 1.0, 0.5).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Rgba::from_hsl(240.0, 1.0, 0.5).to_rgba8(), [0, 0, 255, 255]);
        assert_eq!(Rgba::from_hsl(360.0, 1.0, 0.5).to_rgba8(), [255, 0, 0, 255]);
    }

    #[test]
    fn hex_roundtrip_of_palette() {
        assert_eq!(Rgba::CYAN.to_hex(), "#00d4ff");
        assert_eq!(Rgba::YELLOW.to_hex(), "#ffed00");
        assert_eq!(Rgba::BLUE.to_hex(), "#124191");
    }
}
