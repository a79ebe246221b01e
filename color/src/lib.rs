use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Color {
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };

    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    pub const GRAY: Self = Self { r: 0.5, g: 0.5, b: 0.5, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from a `0xRRGGBB` integer.
    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with alpha clamped to [0, 1].
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn alpha(&self) -> f32 {
        self.a
    }

    /// 8 bit channels, alpha stays a float.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }
}

/// A fixed, ordered color cycle. Index `i` wraps around the palette length.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// The ggplot color cycle.
    pub fn ggplot() -> Self {
        Self::new(vec![
            Color::from_rgb_hex(0xe24a33), // red
            Color::from_rgb_hex(0x348abd), // blue
            Color::from_rgb_hex(0x988ed5), // purple
            Color::from_rgb_hex(0x777777), // gray
            Color::from_rgb_hex(0xfbc15e), // yellow
            Color::from_rgb_hex(0x8eba42), // green
            Color::from_rgb_hex(0xffb5b8), // pink
        ])
    }

    pub fn dark() -> Self {
        Self::new(vec![
            Color::from_rgb_hex(0xf94144), //red
            Color::from_rgb_hex(0x277da1), //blue
            Color::from_rgb_hex(0x90be6d), //green
            Color::from_rgb_hex(0xf9c74f), //yellow
            Color::from_rgb_hex(0x577590), // bluish purple
            Color::from_rgb_hex(0xf9844a), //salmon
            Color::from_rgb_hex(0x43aa8b), //teal
            Color::from_rgb_hex(0xf8961e), //orange
            Color::from_rgb_hex(0xf3722c), // dark orange
            Color::from_rgb_hex(0x4d908e), // gray blue
        ])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color for cycle index `i`. An empty palette falls back to black.
    pub fn get(&self, i: usize) -> Color {
        if self.colors.is_empty() {
            return Color::BLACK;
        }
        self.colors[i % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ggplot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_rgb_hex() {
        let c = Color::from_rgb_hex(0x348abd);
        assert_eq!(c.to_rgb8(), (0x34, 0x8a, 0xbd));
        assert_abs_diff_eq!(c.alpha(), 1.0);
    }

    #[test]
    fn test_with_alpha() {
        let c = Color::from_rgb_hex(0x348abd).with_alpha(0.2);
        assert_abs_diff_eq!(c.alpha(), 0.2);
        assert_eq!(c.to_rgb8(), (0x34, 0x8a, 0xbd));
        assert_abs_diff_eq!(Color::RED.with_alpha(1.5).alpha(), 1.0);
    }

    #[test]
    fn test_palette_cycles() {
        let palette = Palette::ggplot();
        assert_eq!(palette.len(), 7);
        assert_eq!(palette.get(0), palette.get(7));
        assert_eq!(palette.get(3), palette.get(10));
        assert_ne!(palette.get(0), palette.get(1));
    }

    #[test]
    fn test_empty_palette() {
        let palette = Palette::new(Vec::new());
        assert!(palette.is_empty());
        assert_eq!(palette.get(4), Color::BLACK);
    }
}
