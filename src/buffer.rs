//! Pixel storage shared by all segments

use crate::color::{Rgb, rgb_to_u32, split};

/// Random-access pixel storage the effects paint into
///
/// Colors are packed `0xWWRRGGBB`. Writes past `len()` are ignored and
/// reads past it return black.
pub trait PixelBuffer {
    /// Number of addressable pixels
    fn len(&self) -> u16;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_pixel(&mut self, index: u16, color: u32);

    fn pixel(&self, index: u16) -> u32;

    /// Copy `count` pixels from `src` to `dest`; ranges may overlap
    fn copy_range(&mut self, dest: u16, src: u16, count: u16) {
        if dest < src {
            for i in 0..count {
                let color = self.pixel(src.saturating_add(i));
                self.set_pixel(dest.saturating_add(i), color);
            }
        } else {
            for i in (0..count).rev() {
                let color = self.pixel(src.saturating_add(i));
                self.set_pixel(dest.saturating_add(i), color);
            }
        }
    }

    /// Turn every pixel off
    fn clear(&mut self);

    /// Pixels in transmission order
    fn as_rgb(&self) -> &[Rgb];
}

/// RGB frame buffer with a fixed capacity and a runtime length
///
/// The white channel is folded into red, green and blue on write.
#[derive(Debug, Clone)]
pub struct FrameBuffer<const N: usize> {
    pixels: [Rgb; N],
    len: u16,
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameBuffer<N> {
    /// Largest length the buffer can address
    #[allow(clippy::cast_possible_truncation)]
    pub const CAPACITY: u16 = if N > u16::MAX as usize {
        u16::MAX
    } else {
        N as u16
    };

    pub const fn new() -> Self {
        Self {
            pixels: [Rgb { r: 0, g: 0, b: 0 }; N],
            len: Self::CAPACITY,
        }
    }

    /// Change the active length, clamped to `1..=CAPACITY`.
    ///
    /// Pixels past the new end are turned off. Returns the stored length.
    pub fn set_len(&mut self, len: u16) -> u16 {
        let len = len.clamp(1.min(Self::CAPACITY), Self::CAPACITY);
        for pixel in self.pixels.iter_mut().skip(usize::from(len)) {
            *pixel = Rgb::default();
        }
        self.len = len;
        len
    }

    /// Sum of every channel of every active pixel
    pub fn intensity_sum(&self) -> u32 {
        self.as_rgb().iter().fold(0, |acc, pixel| {
            acc + u32::from(pixel.r) + u32::from(pixel.g) + u32::from(pixel.b)
        })
    }
}

impl<const N: usize> PixelBuffer for FrameBuffer<N> {
    fn len(&self) -> u16 {
        self.len
    }

    fn set_pixel(&mut self, index: u16, color: u32) {
        if index >= self.len {
            return;
        }
        let (w, r, g, b) = split(color);
        self.pixels[usize::from(index)] = Rgb {
            r: r.saturating_add(w),
            g: g.saturating_add(w),
            b: b.saturating_add(w),
        };
    }

    fn pixel(&self, index: u16) -> u32 {
        if index >= self.len {
            return 0;
        }
        rgb_to_u32(self.pixels[usize::from(index)])
    }

    fn copy_range(&mut self, dest: u16, src: u16, count: u16) {
        let len = self.len;
        if dest >= len || src >= len {
            return;
        }
        let count = count.min(len - dest).min(len - src);
        let src = usize::from(src);
        self.pixels
            .copy_within(src..src + usize::from(count), usize::from(dest));
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgb::default());
    }

    fn as_rgb(&self) -> &[Rgb] {
        &self.pixels[..usize::from(self.len)]
    }
}

