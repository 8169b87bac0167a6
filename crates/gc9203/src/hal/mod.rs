//! Colour and configuration types shared by the driver surface.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use platform::Rotation;

/// A 7-bit panel colour index laid out as `RRGGGBB` (2:3:2).
///
/// Stored in the framebuffer shifted left by one, with bit 0 of the cell
/// reserved for the dirty flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(u8);

impl Color {
    /// All channels off
    pub const BLACK: Self = Self(0);
    /// All channels at full scale
    pub const WHITE: Self = Self(0x7F);
    /// Red channel only
    pub const RED: Self = Self(0b11_000_00);
    /// Green channel only
    pub const GREEN: Self = Self(0b00_111_00);
    /// Blue channel only
    pub const BLUE: Self = Self(0b00_000_11);

    /// Wrap a raw index; bit 7 is discarded.
    pub const fn new(index: u8) -> Self {
        Self(index & 0x7F)
    }

    /// Pack channel values. Each channel keeps only its low bits
    /// (red 2, green 3, blue 2).
    pub const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        Self(((red & 0b11) << 5) | ((green & 0b111) << 2) | (blue & 0b11))
    }

    /// The 7-bit index.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Framebuffer cell encoding with the dirty bit clear.
    pub(crate) const fn to_cell(self) -> u8 {
        self.0 << 1
    }

    /// Decode the colour held by a framebuffer cell.
    pub(crate) const fn from_cell(cell: u8) -> Self {
        Self(cell >> 1)
    }
}

impl From<u8> for Color {
    fn from(index: u8) -> Self {
        Self::new(index)
    }
}

impl From<Rgb565> for Color {
    /// Keep the top bits of each channel.
    fn from(color: Rgb565) -> Self {
        Self::from_channels(color.r() >> 3, color.g() >> 3, color.b() >> 3)
    }
}

/// Driver configuration given at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayConfig {
    /// Initial panel orientation
    pub rotation: Rotation,
}

impl DisplayConfig {
    /// Configuration with the given orientation.
    pub const fn with_rotation(rotation: Rotation) -> Self {
        Self { rotation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_masks_bit_seven() {
        assert_eq!(Color::new(0xFF).index(), 0x7F);
        assert_eq!(Color::from(0x80).index(), 0);
    }

    #[test]
    fn channel_packing() {
        assert_eq!(Color::from_channels(3, 0, 0), Color::RED);
        assert_eq!(Color::from_channels(0, 7, 0), Color::GREEN);
        assert_eq!(Color::from_channels(0, 0, 3), Color::BLUE);
        assert_eq!(Color::from_channels(3, 7, 3), Color::WHITE);
    }

    #[test]
    fn cell_encoding_reserves_bit_zero() {
        for index in 0..=0x7F {
            let cell = Color::new(index).to_cell();
            assert_eq!(cell & 0x01, 0);
            assert_eq!(Color::from_cell(cell | 0x01).index(), index);
        }
    }

    #[test]
    fn rgb565_truncates_channels() {
        assert_eq!(Color::from(Rgb565::BLACK), Color::BLACK);
        assert_eq!(Color::from(Rgb565::WHITE), Color::WHITE);
        assert_eq!(Color::from(Rgb565::RED), Color::RED);
        assert_eq!(Color::from(Rgb565::GREEN), Color::GREEN);
        assert_eq!(Color::from(Rgb565::BLUE), Color::BLUE);
        // r=16/31, g=32/63, b=8/31 -> 2, 4, 1
        assert_eq!(
            Color::from(Rgb565::new(16, 32, 8)),
            Color::from_channels(2, 4, 1)
        );
    }
}
