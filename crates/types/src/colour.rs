//! Packed ARGB colour values.

use serde::{Deserialize, Serialize};

/// 32-bit colour packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Colour(pub u32);

impl Colour {
    pub const BLACK: Colour = Colour(0xFF00_0000);
    pub const WHITE: Colour = Colour(0xFFFF_FFFF);
    pub const TRANSPARENT: Colour = Colour(0);

    /// Opaque colour from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Colour((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Same colour with only the alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Colour((self.0 & 0x00FF_FFFF) | (a as u32) << 24)
    }

    /// `(r, g, b, a)`.
    pub const fn channels(self) -> (u8, u8, u8, u8) {
        (self.r(), self.g(), self.b(), self.a())
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl From<u32> for Colour {
    fn from(v: u32) -> Self {
        Colour(v)
    }
}

impl From<Colour> for u32 {
    fn from(c: Colour) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Colour::rgb(0xE2, 0x8F, 0x00), Colour(0xFFE2_8F00));
        assert_eq!(Colour::rgb(0, 0, 0), Colour::BLACK);
    }

    #[test]
    fn with_alpha_keeps_colour_channels() {
        let c = Colour(0xFF12_3456).with_alpha(0x80);
        assert_eq!(c, Colour(0x8012_3456));
        assert_eq!(c.with_alpha(0xFF), Colour(0xFF12_3456));
    }

    #[test]
    fn serializes_as_plain_integer() {
        let c: Colour = serde_json::from_str("4278190080").unwrap();
        assert_eq!(c, Colour::BLACK);
    }
}
