//! Host input path
//!
//! Control requests coming from buttons, network handlers or interrupts are
//! queued as [`ControlIntent`]s and applied by the engine at the start of its
//! next service call.

use crate::channel::{Channel, Receiver, Sender};
use crate::registry::ModeId;
use crate::segment::{NUM_COLORS, Segment, SegmentOptions};

/// A single control request
///
/// Segment-scoped intents carry the segment index; invalid indices are
/// rejected by the engine the same way a direct call would be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlIntent {
    SetMode { segment: u8, mode: ModeId },
    SetSpeed { segment: u8, speed: u16 },
    SetColors { segment: u8, colors: [u32; NUM_COLORS] },
    SetOptions { segment: u8, options: SegmentOptions },
    /// Replace a whole segment
    SetSegment { index: u8, segment: Segment },
    SetBrightness(u8),
    SetNumSegments(u8),
    /// External level for level-driven modes (VU meter)
    SetLevel(u8),
    Start,
    Stop,
    Pause,
    Resume,
    /// Run every active segment on the next service call
    Trigger,
}

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> = Sender<'a, ControlIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, ControlIntent, SIZE>;

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Channel<ControlIntent, SIZE>;

/// Drains queued intents into the engine's control surface
#[derive(Clone, Copy)]
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Process all pending intents from the channel (non-blocking)
    ///
    /// Returns the number of intents handed to `apply`.
    pub fn process_pending(&self, apply: impl FnMut(ControlIntent)) -> usize {
        self.intents.drain(apply)
    }
}
