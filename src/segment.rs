//! Segment model: user configuration plus the per-segment running state

use crate::registry::ModeId;

/// Maximum number of segments an engine can hold
pub const MAX_NUM_SEGMENTS: usize = 30;
/// Number of colors each segment carries
pub const NUM_COLORS: usize = 3;

pub const SPEED_MIN: u16 = 2;
pub const SPEED_MAX: u16 = u16::MAX;

pub const DEFAULT_SPEED: u16 = 1000;
pub const DEFAULT_COLOR: u32 = 0x00FF_0000;

const REVERSE_BIT: u8 = 0x80;
const FADE_RATE_SHIFT: u8 = 4;
const GAMMA_BIT: u8 = 0x08;
const SIZE_SHIFT: u8 = 1;

/// Result of a configuration call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigStatus {
    /// Value stored as given
    #[default]
    Applied,
    /// Value stored after being clamped or reordered into range
    Clamped,
    /// Call ignored, nothing changed
    Rejected,
}

impl ConfigStatus {
    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }

    pub(crate) const fn from_clamped(clamped: bool) -> Self {
        if clamped { Self::Clamped } else { Self::Applied }
    }
}

/// How quickly fading modes move toward the background color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FadeRate {
    /// Halve every channel per step
    #[default]
    Halve = 0,
    XFast = 1,
    Fast = 2,
    Medium = 3,
    Slow = 4,
    XSlow = 5,
    XXSlow = 6,
    Glacial = 7,
}

impl FadeRate {
    pub const fn from_raw(value: u8) -> Self {
        match value & 0x07 {
            1 => Self::XFast,
            2 => Self::Fast,
            3 => Self::Medium,
            4 => Self::Slow,
            5 => Self::XSlow,
            6 => Self::XXSlow,
            7 => Self::Glacial,
            _ => Self::Halve,
        }
    }
}

/// Size of the moving elements drawn by size-aware modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SegmentSize {
    #[default]
    Small = 0,
    Medium = 1,
    Large = 2,
    XLarge = 3,
}

impl SegmentSize {
    pub const fn from_raw(value: u8) -> Self {
        match value & 0x03 {
            1 => Self::Medium,
            2 => Self::Large,
            3 => Self::XLarge,
            _ => Self::Small,
        }
    }

    /// Element width in pixels: 1, 2, 4 or 8
    pub const fn pixels(self) -> u16 {
        1 << self as u16
    }
}

/// Per-segment rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentOptions {
    /// Run the animation from `stop` toward `start`
    pub reverse: bool,
    pub fade_rate: FadeRate,
    /// Gamma-correct every pixel this segment writes
    pub gamma: bool,
    pub size: SegmentSize,
}

impl SegmentOptions {
    /// Pack into the legacy options byte
    pub const fn to_bits(self) -> u8 {
        let mut bits = ((self.fade_rate as u8) << FADE_RATE_SHIFT) | ((self.size as u8) << SIZE_SHIFT);
        if self.reverse {
            bits |= REVERSE_BIT;
        }
        if self.gamma {
            bits |= GAMMA_BIT;
        }
        bits
    }

    /// Unpack the legacy options byte; the reserved bit is ignored
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            reverse: bits & REVERSE_BIT != 0,
            fade_rate: FadeRate::from_raw(bits >> FADE_RATE_SHIFT),
            gamma: bits & GAMMA_BIT != 0,
            size: SegmentSize::from_raw(bits >> SIZE_SHIFT),
        }
    }
}

/// A contiguous, inclusive pixel range running one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u16,
    pub stop: u16,
    pub mode: ModeId,
    pub speed: u16,
    pub options: SegmentOptions,
    pub colors: [u32; NUM_COLORS],
}

impl Default for Segment {
    fn default() -> Self {
        Self {
            start: 0,
            stop: 0,
            mode: ModeId::STATIC,
            speed: DEFAULT_SPEED,
            options: SegmentOptions::default(),
            colors: [DEFAULT_COLOR, 0, 0],
        }
    }
}

impl Segment {
    /// Number of pixels covered (`stop - start + 1`)
    pub const fn len(&self) -> u16 {
        self.stop.saturating_sub(self.start) + 1
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn contains(&self, index: u16) -> bool {
        index >= self.start && index <= self.stop
    }

    /// Order and clamp the range into a strip of `strip_len` pixels and
    /// clamp the speed. Returns whether anything had to change.
    pub fn normalize(&mut self, strip_len: u16) -> bool {
        let mut clamped = false;
        if self.start > self.stop {
            core::mem::swap(&mut self.start, &mut self.stop);
            clamped = true;
        }

        let last = strip_len.saturating_sub(1);
        if self.stop > last {
            self.stop = last;
            clamped = true;
        }
        if self.start > self.stop {
            self.start = self.stop;
            clamped = true;
        }

        let speed = clamp_speed(self.speed);
        if speed != self.speed {
            self.speed = speed;
            clamped = true;
        }
        clamped
    }
}

/// Clamp a speed value into the supported range
pub const fn clamp_speed(speed: u16) -> u16 {
    if speed < SPEED_MIN { SPEED_MIN } else { speed }
}

/// Mutable running state paired with each segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentRuntime {
    /// Clock value (ms) at which the segment is next due
    pub next_time: u32,
    pub counter_mode_step: u32,
    /// Number of times the routine ran since the last reset
    pub counter_mode_call: u32,
    pub aux_param: u8,
    /// Bit 7: FRAME, bit 6: CYCLE, the rest is free for routines
    pub aux_param2: u8,
    pub aux_param3: u16,
}

impl SegmentRuntime {
    pub const FRAME: u8 = 0x80;
    pub const CYCLE: u8 = 0x40;

    /// Zero all counters and make the segment due at `now`
    pub fn reset(&mut self, now: u32) {
        *self = Self {
            next_time: now,
            ..Self::default()
        };
    }

    pub const fn is_frame(&self) -> bool {
        self.aux_param2 & Self::FRAME != 0
    }

    pub const fn is_cycle(&self) -> bool {
        self.aux_param2 & Self::CYCLE != 0
    }

    pub fn set_frame(&mut self) {
        self.aux_param2 |= Self::FRAME;
    }

    pub fn set_cycle(&mut self) {
        self.aux_param2 |= Self::CYCLE;
    }

    pub(crate) fn clear_flags(&mut self) {
        self.aux_param2 &= !(Self::FRAME | Self::CYCLE);
    }
}

/// Fixed-capacity table of segments with their paired runtimes
#[derive(Debug, Clone)]
pub struct SegmentStore {
    segments: [Segment; MAX_NUM_SEGMENTS],
    runtimes: [SegmentRuntime; MAX_NUM_SEGMENTS],
    active: usize,
}

impl Default for SegmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentStore {
    pub fn new() -> Self {
        Self {
            segments: [Segment::default(); MAX_NUM_SEGMENTS],
            runtimes: [SegmentRuntime::default(); MAX_NUM_SEGMENTS],
            active: 1,
        }
    }

    /// Number of active segments
    pub const fn active(&self) -> usize {
        self.active
    }

    /// Set the number of active segments, clamped to `1..=MAX_NUM_SEGMENTS`.
    /// Entries beyond the count stay stored but are not evaluated.
    pub fn set_active(&mut self, count: usize) -> ConfigStatus {
        let clamped = count.clamp(1, MAX_NUM_SEGMENTS);
        self.active = clamped;
        ConfigStatus::from_clamped(clamped != count)
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.segments.get_mut(index)
    }

    pub fn runtime(&self, index: usize) -> Option<&SegmentRuntime> {
        self.runtimes.get(index)
    }

    pub fn runtime_mut(&mut self, index: usize) -> Option<&mut SegmentRuntime> {
        self.runtimes.get_mut(index)
    }

    /// Borrow a segment together with its runtime
    pub fn pair_mut(&mut self, index: usize) -> Option<(&Segment, &mut SegmentRuntime)> {
        let segment = self.segments.get(index)?;
        let runtime = self.runtimes.get_mut(index)?;
        Some((segment, runtime))
    }

    /// Replace a whole segment, normalized into a strip of `strip_len` pixels.
    ///
    /// Writing past the active count grows it to include `index`.
    pub fn set(&mut self, index: usize, mut segment: Segment, strip_len: u16) -> ConfigStatus {
        let Some(slot) = self.segments.get_mut(index) else {
            return ConfigStatus::Rejected;
        };
        let clamped = segment.normalize(strip_len);
        *slot = segment;
        if index >= self.active {
            self.active = index + 1;
        }
        ConfigStatus::from_clamped(clamped)
    }

    pub fn reset_runtime(&mut self, index: usize, now: u32) -> ConfigStatus {
        match self.runtimes.get_mut(index) {
            Some(runtime) => {
                runtime.reset(now);
                ConfigStatus::Applied
            }
            None => ConfigStatus::Rejected,
        }
    }

    pub fn reset_runtimes(&mut self, now: u32) {
        for runtime in &mut self.runtimes {
            runtime.reset(now);
        }
    }

    /// Clamp every stored segment into a strip of `strip_len` pixels
    pub fn clamp_all(&mut self, strip_len: u16) {
        for segment in &mut self.segments {
            segment.normalize(strip_len);
        }
    }
}
