use crate::{color::rgbw, random::Prng};

/// Minimum hue distance between two consecutive random wheel picks
const MIN_WHEEL_DISTANCE: u8 = 42;

/// Draw limit for [`random_wheel_index`]
const MAX_WHEEL_DRAWS: u8 = 16;

/// Map a position on the color wheel to a color
///
/// Red at 0, green at 85, blue at 170, back to red at 255.
pub const fn color_wheel(pos: u8) -> u32 {
    let pos = 255 - pos;
    if pos < 85 {
        rgbw(255 - pos * 3, 0, pos * 3, 0)
    } else if pos < 170 {
        let pos = pos - 85;
        rgbw(0, pos * 3, 255 - pos * 3, 0)
    } else {
        let pos = pos - 170;
        rgbw(pos * 3, 255 - pos * 3, 0, 0)
    }
}

/// Pick a random wheel position that is visibly different from `previous`
///
/// Gives up after a bounded number of draws and returns the last one.
pub fn random_wheel_index(rng: &mut Prng, previous: u8) -> u8 {
    let mut candidate = rng.random8();
    for _ in 1..MAX_WHEEL_DRAWS {
        if wheel_distance(previous, candidate) >= MIN_WHEEL_DISTANCE {
            break;
        }
        candidate = rng.random8();
    }
    candidate
}

/// Circular distance between two wheel positions
pub const fn wheel_distance(a: u8, b: u8) -> u8 {
    let x = a.abs_diff(b);
    let y = 255 - x;
    if x < y { x } else { y }
}
