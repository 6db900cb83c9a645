//! Hue-cycling color schemes shared by the "cycle" family of modes

use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb, rgb_from_u32, rgb_to_u32, sample_palette},
    math8::{scale8, triangle8},
};

/// Create a palette from a list of hex colors (0xRRGGBB format)
macro_rules! hex_palette {
    ($($color:expr),*) => {
        [
            $(rgb_from_u32($color)),*
        ]
    };
}

// Red, green, white, gold and back to red so the loop is seamless
#[allow(clippy::unreadable_literal)]
const CHRISTMAS_PALETTE: [Rgb; 5] = hex_palette![
    0xFF0000, // Red
    0x00FF00, // Green
    0xFFFFFF, // White
    0xFFB000, // Gold
    0xFF0000  // Red
];

pub(crate) const WARM: u8 = 0;
pub(crate) const COOL: u8 = 1;
pub(crate) const NATURE: u8 = 2;
pub(crate) const CANDY: u8 = 3;
pub(crate) const CHRISTMAS: u8 = 4;

/// Color scheme selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorScheme {
    /// Reds, oranges and yellows
    Warm = WARM,
    /// Teals and blues
    Cool = COOL,
    /// Yellow-greens and greens
    Nature = NATURE,
    /// Pastel purples and pinks
    Candy = CANDY,
    /// Curated red/green/white/gold palette
    Christmas = CHRISTMAS,
}

impl ColorScheme {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            WARM => Self::Warm,
            COOL => Self::Cool,
            NATURE => Self::Nature,
            CANDY => Self::Candy,
            CHRISTMAS => Self::Christmas,
            _ => return None,
        })
    }

    /// Hue modulation width of the scheme
    ///
    /// A negative value means the scheme has no hue window and samples
    /// its fixed palette instead.
    pub const fn modulation(self) -> i16 {
        match self {
            Self::Warm => 150,
            Self::Cool => 60,
            Self::Nature => 50,
            Self::Candy => 40,
            Self::Christmas => -1,
        }
    }

    const fn base_hue(self) -> u8 {
        match self {
            Self::Warm => 240,
            Self::Cool => 135,
            Self::Nature => 72,
            Self::Candy => 210,
            Self::Christmas => 0,
        }
    }

    const fn saturation(self) -> u8 {
        match self {
            Self::Candy => 180,
            _ => 255,
        }
    }

    /// Color of the scheme at position `pos` (0-255, periodic)
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn color(self, pos: u8) -> u32 {
        let modulation = self.modulation();
        if modulation < 0 {
            return rgb_to_u32(sample_palette(&CHRISTMAS_PALETTE, pos));
        }

        let width = (modulation / 2).min(255) as u8;
        let hue = self.base_hue().wrapping_add(scale8(triangle8(pos), width));
        rgb_to_u32(hsv2rgb(Hsv {
            hue,
            sat: self.saturation(),
            val: 255,
        }))
    }
}
