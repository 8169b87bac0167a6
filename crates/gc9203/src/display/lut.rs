//! 8-bit colour code → 16-bit panel colour word
//!
//! The code is the framebuffer cell with the dirty bit masked off, so bits
//! 7..1 carry a 2:3:2 colour and bit 0 never contributes. Each input bit
//! sets a fixed pair of output bits:
//!
//! | code bit | word bits |
//! |----------|-----------|
//! | 7        | `0xC000`  |
//! | 6        | `0x3000`  |
//! | 5        | `0x0600`  |
//! | 4        | `0x0180`  |
//! | 3        | `0x0060`  |
//! | 2        | `0x0018`  |
//! | 1        | `0x0006`  |

use super::framebuffer::DIRTY_BIT;

/// Number of table entries, one per 8-bit code.
pub const LUT_SIZE: usize = 256;

/// `(code bit, word bits)` pairs.
const SPREAD: [(u8, u16); 7] = [
    (0b1000_0000, 0b1100_0000_0000_0000),
    (0b0100_0000, 0b0011_0000_0000_0000),
    (0b0010_0000, 0b0000_0110_0000_0000),
    (0b0001_0000, 0b0000_0001_1000_0000),
    (0b0000_1000, 0b0000_0000_0110_0000),
    (0b0000_0100, 0b0000_0000_0001_1000),
    (0b0000_0010, 0b0000_0000_0000_0110),
];

/// Compute the panel word for one code.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)] // i < SPREAD.len()
pub const fn color_word(code: u8) -> u16 {
    let mut word = 0;
    let mut i = 0;
    while i < SPREAD.len() {
        let (bit, bits) = SPREAD[i];
        if code & bit != 0 {
            word |= bits;
        }
        i += 1;
    }
    word
}

/// Immutable 256-entry colour table.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorLut {
    words: [u16; LUT_SIZE],
}

impl ColorLut {
    /// Build the table.
    #[allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation
    )] // code < LUT_SIZE = 256
    pub const fn build() -> Self {
        let mut words = [0u16; LUT_SIZE];
        let mut code = 0;
        while code < LUT_SIZE {
            words[code] = color_word(code as u8);
            code += 1;
        }
        Self { words }
    }

    /// Word for an 8-bit code.
    #[allow(clippy::indexing_slicing)] // every u8 is a valid index into 256 entries
    #[inline]
    pub fn word(&self, code: u8) -> u16 {
        self.words[usize::from(code)]
    }

    /// Word for a framebuffer cell, ignoring its dirty bit.
    #[inline]
    pub fn resolve(&self, cell: u8) -> u16 {
        self.word(cell & !DIRTY_BIT)
    }

    /// The whole table.
    pub fn as_array(&self) -> &[u16; LUT_SIZE] {
        &self.words
    }
}

impl Default for ColorLut {
    fn default() -> Self {
        Self::build()
    }
}

impl core::fmt::Debug for ColorLut {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ColorLut")
            .field("entries", &LUT_SIZE)
            .finish()
    }
}
