//! Effect routines and the context they run in
//!
//! Every mode is a plain function that paints one segment and returns how
//! long to wait before it runs again. Routines keep their state only in the
//! segment runtime, so any number of segments can share one routine.

pub(crate) mod basic;
pub(crate) mod chase;
pub(crate) mod fire;
pub(crate) mod physics;
pub(crate) mod rainbow;
pub(crate) mod scanner;
pub(crate) mod twinkle;
pub(crate) mod wipe;

use embassy_time::Duration;

use crate::{
    buffer::PixelBuffer,
    color::{ColorScheme, random_wheel_index, rgbw, split},
    gamma::gamma32,
    random::Prng,
    segment::{FadeRate, Segment, SegmentRuntime},
};

/// Effect routine signature
///
/// Returns the delay until the routine wants to run again.
pub type EffectFn = fn(&mut EffectContext<'_>) -> Duration;

/// Delay returned by an unassigned custom slot
pub const IDLE_EFFECT_DELAY: Duration = Duration::from_millis(1000);

/// Routine for custom slots nothing has been registered in
pub fn idle_effect(_ctx: &mut EffectContext<'_>) -> Duration {
    IDLE_EFFECT_DELAY
}

/// Scheme selected by a const generic parameter of a scheme-aware routine
pub(crate) const fn scheme<const S: u8>() -> ColorScheme {
    match ColorScheme::from_raw(S) {
        Some(scheme) => scheme,
        None => ColorScheme::Warm,
    }
}

const FADE_RATE_HIGH: [u8; 8] = [0, 1, 1, 1, 2, 3, 4, 6];
const FADE_RATE_LOW: [u8; 8] = [0, 2, 3, 8, 8, 8, 8, 8];

/// Everything a routine may touch while painting one segment
///
/// Pixel writes are limited to the segment range; anything outside is
/// dropped silently.
pub struct EffectContext<'a> {
    segment: &'a Segment,
    /// Running state of the segment being painted
    pub runtime: &'a mut SegmentRuntime,
    pixels: &'a mut dyn PixelBuffer,
    rng: &'a mut Prng,
    triggered: bool,
    level: u8,
}

impl<'a> EffectContext<'a> {
    pub fn new(
        segment: &'a Segment,
        runtime: &'a mut SegmentRuntime,
        pixels: &'a mut dyn PixelBuffer,
        rng: &'a mut Prng,
    ) -> Self {
        Self {
            segment,
            runtime,
            pixels,
            rng,
            triggered: false,
            level: 0,
        }
    }

    /// Mark the context as running in response to a trigger
    #[must_use]
    pub fn with_trigger(mut self, triggered: bool) -> Self {
        self.triggered = triggered;
        self
    }

    /// Attach the external level input (audio, sensor)
    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub const fn segment(&self) -> &Segment {
        self.segment
    }

    pub const fn start(&self) -> u16 {
        self.segment.start
    }

    pub const fn stop(&self) -> u16 {
        self.segment.stop
    }

    pub const fn len(&self) -> u16 {
        self.segment.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    pub const fn speed(&self) -> u16 {
        self.segment.speed
    }

    /// Segment color `index` (black when out of range)
    pub fn color(&self, index: usize) -> u32 {
        self.segment.colors.get(index).copied().unwrap_or(0)
    }

    pub const fn is_reverse(&self) -> bool {
        self.segment.options.reverse
    }

    /// Element width in pixels selected by the size option
    pub const fn size(&self) -> u16 {
        self.segment.options.size.pixels()
    }

    pub const fn triggered(&self) -> bool {
        self.triggered
    }

    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Flag that the routine finished a full animation cycle
    pub fn set_cycle(&mut self) {
        self.runtime.set_cycle();
    }

    /// `speed / divisor` as a delay, never dividing by zero
    pub fn speed_div(&self, divisor: u32) -> Duration {
        Duration::from_millis(u64::from(u32::from(self.speed()) / divisor.max(1)))
    }

    /// Write one pixel, gamma-corrected when the segment asks for it
    pub fn set_pixel(&mut self, index: u16, color: u32) {
        if !self.segment.contains(index) {
            return;
        }
        let color = self.corrected(color);
        self.pixels.set_pixel(index, color);
    }

    /// `color` the way it lands in the buffer, gamma-corrected when the
    /// segment asks for it
    pub fn corrected(&self, color: u32) -> u32 {
        if self.segment.options.gamma {
            gamma32(color)
        } else {
            color
        }
    }

    /// Write one pixel exactly as given, skipping gamma correction.
    ///
    /// For routines that recombine colors already read back from the buffer.
    pub fn put_pixel(&mut self, index: u16, color: u32) {
        if self.segment.contains(index) {
            self.pixels.set_pixel(index, color);
        }
    }

    /// Write a pixel relative to the start of the segment
    pub fn set_offset(&mut self, offset: u16, color: u32) {
        if offset < self.len() {
            self.set_pixel(self.start() + offset, color);
        }
    }

    /// Write a pixel relative to the segment start, or to the stop when
    /// the reverse option is set
    pub fn set_directed(&mut self, offset: u16, color: u32) {
        if offset >= self.len() {
            return;
        }
        let index = if self.is_reverse() {
            self.stop() - offset
        } else {
            self.start() + offset
        };
        self.set_pixel(index, color);
    }

    pub fn pixel(&self, index: u16) -> u32 {
        if !self.segment.contains(index) {
            return 0;
        }
        self.pixels.pixel(index)
    }

    /// Fill the whole segment
    pub fn fill(&mut self, color: u32) {
        for index in self.start()..=self.stop() {
            self.set_pixel(index, color);
        }
    }

    /// Fill `count` pixels starting at absolute `first`, clipped to the segment
    pub fn fill_range(&mut self, first: u16, count: u16, color: u32) {
        let last = first.saturating_add(count).min(self.stop().saturating_add(1));
        for index in first.max(self.start())..last {
            self.set_pixel(index, color);
        }
    }

    /// Copy `count` pixels inside the segment; the ranges may overlap
    pub fn copy_pixels(&mut self, dest: u16, src: u16, count: u16) {
        if !self.segment.contains(dest) || !self.segment.contains(src) {
            return;
        }
        let end = self.stop() + 1;
        let count = count.min(end - dest).min(end - src);
        self.pixels.copy_range(dest, src, count);
    }

    /// Shift every pixel one step in the running direction and return the
    /// head index, whose old value is left in place
    pub fn shift_forward(&mut self) -> u16 {
        let count = self.len() - 1;
        if self.is_reverse() {
            self.copy_pixels(self.start(), self.start() + 1, count);
            self.stop()
        } else {
            self.copy_pixels(self.start() + 1, self.start(), count);
            self.start()
        }
    }

    /// Fade the segment toward its second color at the configured rate
    pub fn fade_out(&mut self) {
        self.fade_out_to(self.color(1));
    }

    /// Fade the segment toward `target` at the configured rate.
    ///
    /// The target is corrected like any painted color, so a faded pixel
    /// settles on the value `fill(target)` would write.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fade_out_to(&mut self, target: u32) {
        let rate = self.segment.options.fade_rate;
        let high = FADE_RATE_HIGH[rate as usize];
        let low = FADE_RATE_LOW[rate as usize];
        let (tw, tr, tg, tb) = split(self.corrected(target));

        let step = |current: u8, target: u8| -> u8 {
            let delta = i16::from(target) - i16::from(current);
            let delta = if delta.abs() < 3 {
                delta
            } else {
                (delta >> high) + (delta >> low)
            };
            (i16::from(current) + delta) as u8
        };

        for index in self.start()..=self.stop() {
            let color = self.pixels.pixel(index);
            let faded = if rate == FadeRate::Halve {
                (color >> 1) & 0x7F7F_7F7F
            } else {
                let (w, r, g, b) = split(color);
                rgbw(step(r, tr), step(g, tg), step(b, tb), step(w, tw))
            };
            self.pixels.set_pixel(index, faded);
        }
    }

    pub fn random8(&mut self) -> u8 {
        self.rng.random8()
    }

    pub fn random8_below(&mut self, limit: u8) -> u8 {
        self.rng.random8_below(limit)
    }

    pub fn random16(&mut self) -> u16 {
        self.rng.random16()
    }

    pub fn random16_below(&mut self, limit: u16) -> u16 {
        self.rng.random16_below(limit)
    }

    pub fn random16_between(&mut self, min: u16, max: u16) -> u16 {
        self.rng.random16_between(min, max)
    }

    /// Random wheel position visibly different from `previous`
    pub fn random_wheel_index(&mut self, previous: u8) -> u8 {
        random_wheel_index(&mut *self.rng, previous)
    }

    /// Random absolute start for an element of `size()` pixels
    pub fn random_element_start(&mut self) -> u16 {
        let span = self.len().saturating_sub(self.size()) + 1;
        self.start() + self.random16_below(span)
    }
}
