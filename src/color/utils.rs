use crate::{color::Rgb, math8::blend8};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Blend two packed `0xWWRRGGBB` colors channel by channel
///
/// `amount_of_b` of 0 returns `a`, 255 returns `b`.
#[allow(clippy::cast_lossless)]
pub const fn color_blend(a: u32, b: u32, amount_of_b: u8) -> u32 {
    let (aw, ar, ag, ab) = split(a);
    let (bw, br, bg, bb) = split(b);
    rgbw(
        blend8(ar, br, amount_of_b),
        blend8(ag, bg, amount_of_b),
        blend8(ab, bb, amount_of_b),
        blend8(aw, bw, amount_of_b),
    )
}

/// Pack channels into a `0xWWRRGGBB` color
#[allow(clippy::cast_lossless)]
pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> u32 {
    ((w as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split a packed color into `(w, r, g, b)`
#[allow(clippy::cast_possible_truncation)]
pub const fn split(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0x00RRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    rgbw(color.r, color.g, color.b, 0)
}

/// Sample the palette at position t (0-255)
#[allow(clippy::cast_possible_truncation)]
pub fn sample_palette(palette: &[Rgb], t: u8) -> Rgb {
    // Map t (0-255) across N colors (N-1 segments) with blending.
    let segments = palette.len().saturating_sub(1);
    if segments == 0 {
        return palette.first().copied().unwrap_or(Rgb { r: 0, g: 0, b: 0 });
    }

    let scaled = u16::from(t) * (segments as u16); // 0..255*(N-1)
    let segment = (scaled >> 8).min(segments.saturating_sub(1) as u16) as usize;
    let local_t = (scaled & 0xFF) as u8;

    blend_colors(palette[segment], palette[segment + 1], local_t)
}
