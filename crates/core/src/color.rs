use std::fmt;

use serde::{Serialize, Serializer};

/// An sRGB color with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
        Some(Self::opaque(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS notation: hex when opaque, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if (self.a - 1.0).abs() < f64::EPSILON {
            self.to_hex()
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    /// Composites this color over an opaque background.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn over(self, background: Self) -> Self {
        let alpha = self.a.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| {
            f64::from(top)
                .mul_add(alpha, f64::from(bottom) * (1.0 - alpha))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self::opaque(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Rgba;

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgba::from_hex("#991b1b"), Some(Rgba::opaque(0x99, 0x1b, 0x1b)));
        assert_eq!(Rgba::from_hex("991b1b"), None);
        assert_eq!(Rgba::from_hex("#99"), None);
        assert_eq!(Rgba::from_hex("#zz1b1b"), None);
    }

    #[test]
    fn css_rendering() {
        assert_eq!(Rgba::opaque(14, 165, 233).to_css(), "#0ea5e9");
        assert_eq!(
            Rgba::with_alpha(255, 255, 255, 0.12).to_css(),
            "rgba(255, 255, 255, 0.12)"
        );
    }

    #[test]
    fn compositing_over_background() {
        let black = Rgba::opaque(0, 0, 0);
        assert_eq!(Rgba::with_alpha(255, 255, 255, 0.5).over(black), Rgba::opaque(128, 128, 128));
        assert_eq!(Rgba::opaque(10, 20, 30).over(black), Rgba::opaque(10, 20, 30));
    }
}
