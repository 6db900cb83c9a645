#![no_std]

pub mod buffer;
pub mod channel;
pub mod color;
pub mod effect;
pub mod engine;
pub mod frame_scheduler;
pub mod gamma;
pub mod intent_processor;
pub mod math8;
pub mod output;
pub mod random;
pub mod registry;
pub mod segment;

pub use buffer::{FrameBuffer, PixelBuffer};
pub use effect::{EffectContext, EffectFn};
pub use engine::{DEFAULT_BRIGHTNESS, Engine, EngineConfig, EngineState};
pub use frame_scheduler::ServiceReport;
pub use gamma::{gamma8, gamma32};
pub use intent_processor::{
    ControlIntent, IntentChannel, IntentProcessor, IntentReceiver, IntentSender,
};
pub use output::SmartLedsOutput;
pub use random::Prng;
pub use registry::{MODE_COUNT, ModeId, ModeRegistry};
pub use segment::{
    ConfigStatus, FadeRate, Segment, SegmentOptions, SegmentRuntime, SegmentSize,
};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The engine is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip.
    ///
    /// `brightness` is the global brightness (0-255) to apply on the way
    /// out; the colors themselves are always full scale.
    fn write(&mut self, colors: &[Rgb], brightness: u8);
}
