mod scheme;
mod utils;
mod wheel;

pub use scheme::ColorScheme;
pub(crate) use scheme::{CANDY, CHRISTMAS, COOL, NATURE, WARM};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{
    blend_colors, color_blend, rgb_from_u32, rgb_to_u32, rgbw, sample_palette, split,
};
pub use wheel::{color_wheel, random_wheel_index, wheel_distance};

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const RED: u32 = 0x00FF_0000;
pub const GREEN: u32 = 0x0000_FF00;
pub const BLUE: u32 = 0x0000_00FF;
pub const WHITE: u32 = 0x00FF_FFFF;
pub const BLACK: u32 = 0x0000_0000;
pub const YELLOW: u32 = 0x00FF_FF00;
pub const CYAN: u32 = 0x0000_FFFF;
pub const MAGENTA: u32 = 0x00FF_00FF;
pub const PURPLE: u32 = 0x0040_0080;
pub const ORANGE: u32 = 0x00FF_3000;
pub const PINK: u32 = 0x00FF_1493;
pub const ULTRAWHITE: u32 = 0xFFFF_FFFF;

/// Dim a packed color to 1/16th of its intensity
pub const fn dark(color: u32) -> u32 {
    (color >> 4) & 0x0F0F_0F0F
}
