use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::buffer::{FrameBuffer, PixelBuffer};
use crate::effect::{EffectContext, EffectFn};
use crate::frame_scheduler::{
    IDLE_POLL, MAX_DELAY_MS, ServiceReport, is_due, millis32, time_until,
};
use crate::intent_processor::{ControlIntent, IntentProcessor, IntentReceiver};
use crate::random::Prng;
use crate::registry::{ModeId, ModeRegistry};
use crate::segment::{
    ConfigStatus, DEFAULT_COLOR, DEFAULT_SPEED, NUM_COLORS, SPEED_MIN, Segment, SegmentOptions,
    SegmentRuntime, SegmentStore, clamp_speed,
};

/// Brightness used when the configuration does not set one
pub const DEFAULT_BRIGHTNESS: u8 = 50;

/// Seed used when the configuration does not set one
pub const DEFAULT_SEED: u64 = 0x5EED_1ED5;

/// Initial configuration of the engine
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Strip length in pixels, clamped to the buffer capacity
    pub length: u16,
    /// Mode of segment 0
    pub mode: ModeId,
    pub speed: u16,
    /// First color of segment 0
    pub color: u32,
    pub brightness: u8,
    /// Seed of the effect random generator; pass real entropy to get
    /// different animations on every boot
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            length: u16::MAX,
            mode: ModeId::STATIC,
            speed: DEFAULT_SPEED,
            color: DEFAULT_COLOR,
            brightness: DEFAULT_BRIGHTNESS,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Stopped,
    Running,
    /// Not rendering, segment state kept for [`Engine::resume`]
    Paused,
}

/// Segment effects engine - the main orchestrator
///
/// Owns the pixel buffer, the segment table and the mode registry, and
/// pushes finished frames to the output driver. Call [`Engine::service`]
/// from the main loop as often as possible, or sleep for the reported
/// duration in between.
pub struct Engine<'a, O: OutputDriver, const LEDS: usize, const INTENTS: usize = 4> {
    // External dependencies
    output: O,
    intents: Option<IntentProcessor<'a, INTENTS>>,

    // Internal state
    buffer: FrameBuffer<LEDS>,
    segments: SegmentStore,
    registry: ModeRegistry,
    rng: Prng,
    state: EngineState,
    brightness: u8,
    level: u8,
    triggered: bool,
    now_ms: u32,
    last_status: ConfigStatus,
}

impl<'a, O: OutputDriver, const LEDS: usize, const INTENTS: usize> Engine<'a, O, LEDS, INTENTS> {
    /// Create a stopped engine with segment 0 covering the whole strip
    pub fn new(output: O, config: &EngineConfig) -> Self {
        let mut engine = Self {
            output,
            intents: None,
            buffer: FrameBuffer::new(),
            segments: SegmentStore::new(),
            registry: ModeRegistry::new(),
            rng: Prng::new(config.seed),
            state: EngineState::Stopped,
            brightness: config.brightness,
            level: 0,
            triggered: false,
            now_ms: 0,
            last_status: ConfigStatus::Applied,
        };
        let length = engine.buffer.set_len(config.length);
        engine.segments.set(
            0,
            Segment {
                stop: length.saturating_sub(1),
                mode: config.mode,
                speed: config.speed,
                colors: [config.color, 0, 0],
                ..Segment::default()
            },
            length,
        );
        engine
    }

    /// Create an engine that also drains an intent channel on every
    /// service call
    pub fn with_intents(
        output: O,
        intents: IntentReceiver<'a, INTENTS>,
        config: &EngineConfig,
    ) -> Self {
        let mut engine = Self::new(output, config);
        engine.intents = Some(IntentProcessor::new(intents));
        engine
    }

    /// Run every due segment and flush the buffer once if anything ran.
    ///
    /// Queued intents are applied first, also while stopped or paused.
    pub fn service(&mut self, now: Instant) -> ServiceReport {
        self.now_ms = millis32(now);
        self.process_intents();

        if self.state != EngineState::Running {
            return ServiceReport::idle(now);
        }

        let now_ms = self.now_ms;
        let triggered = self.triggered;
        let mut executed = 0;
        for index in 0..self.segments.active() {
            let Some((segment, runtime)) = self.segments.pair_mut(index) else {
                continue;
            };
            runtime.clear_flags();
            // a freshly reset runtime is due whatever the clock says
            let fresh = runtime.counter_mode_call == 0;
            if !triggered && !fresh && !is_due(now_ms, runtime.next_time) {
                continue;
            }

            let effect = self.registry.effect(segment.mode);
            let mut ctx = EffectContext::new(segment, runtime, &mut self.buffer, &mut self.rng)
                .with_trigger(triggered)
                .with_level(self.level);
            let delay = effect(&mut ctx);

            let delay_ms = u32::try_from(delay.as_millis())
                .unwrap_or(MAX_DELAY_MS)
                .clamp(u32::from(SPEED_MIN), MAX_DELAY_MS);
            runtime.set_frame();
            runtime.next_time = now_ms.wrapping_add(delay_ms);
            runtime.counter_mode_call = runtime.counter_mode_call.wrapping_add(1);
            executed += 1;
        }
        self.triggered = false;

        let flushed = executed > 0;
        if flushed {
            self.flush();
        }

        let sleep_duration = self.time_to_next_segment();
        ServiceReport {
            flushed,
            executed,
            next_deadline: now + sleep_duration,
            sleep_duration,
        }
    }

    fn time_to_next_segment(&self) -> Duration {
        (0..self.segments.active())
            .filter_map(|index| self.segments.runtime(index))
            .map(|runtime| time_until(self.now_ms, runtime.next_time))
            .min()
            .unwrap_or(IDLE_POLL)
    }

    fn flush(&mut self) {
        self.output.write(self.buffer.as_rgb(), self.brightness);
    }

    fn process_intents(&mut self) {
        if let Some(processor) = self.intents {
            processor.process_pending(|intent| {
                self.apply_intent(intent);
            });
        }
    }

    /// Apply a single intent through the regular control surface
    pub fn apply_intent(&mut self, intent: ControlIntent) -> ConfigStatus {
        match intent {
            ControlIntent::SetMode { segment, mode } => {
                self.set_segment_mode(usize::from(segment), mode)
            }
            ControlIntent::SetSpeed { segment, speed } => {
                self.set_segment_speed(usize::from(segment), speed)
            }
            ControlIntent::SetColors { segment, colors } => {
                self.set_segment_colors(usize::from(segment), colors)
            }
            ControlIntent::SetOptions { segment, options } => {
                self.set_segment_options(usize::from(segment), options)
            }
            ControlIntent::SetSegment { index, segment } => {
                self.set_segment(usize::from(index), segment)
            }
            ControlIntent::SetBrightness(brightness) => self.set_brightness(brightness),
            ControlIntent::SetNumSegments(count) => self.set_num_segments(usize::from(count)),
            ControlIntent::SetLevel(level) => self.set_level(level),
            ControlIntent::Start => self.start(),
            ControlIntent::Stop => self.stop(),
            ControlIntent::Pause => self.pause(),
            ControlIntent::Resume => self.resume(),
            ControlIntent::Trigger => self.trigger(),
        }
    }

    fn record(&mut self, status: ConfigStatus) -> ConfigStatus {
        self.last_status = status;
        status
    }

    /// Status of the most recent configuration call
    pub const fn last_status(&self) -> ConfigStatus {
        self.last_status
    }

    // State machine

    pub const fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Start rendering from a fresh runtime on every segment
    pub fn start(&mut self) -> ConfigStatus {
        #[cfg(feature = "esp32-log")]
        println!("[Engine.start] {} segment(s)", self.segments.active());
        self.segments.reset_runtimes(self.now_ms);
        self.state = EngineState::Running;
        self.record(ConfigStatus::Applied)
    }

    /// Stop rendering, turn the strip off
    pub fn stop(&mut self) -> ConfigStatus {
        #[cfg(feature = "esp32-log")]
        println!("[Engine.stop]");
        self.state = EngineState::Stopped;
        self.strip_off();
        self.record(ConfigStatus::Applied)
    }

    /// Freeze the animation; rejected unless running
    pub fn pause(&mut self) -> ConfigStatus {
        if self.state != EngineState::Running {
            return self.record(ConfigStatus::Rejected);
        }
        #[cfg(feature = "esp32-log")]
        println!("[Engine.pause]");
        self.state = EngineState::Paused;
        self.record(ConfigStatus::Applied)
    }

    /// Continue a paused animation; rejected unless paused
    pub fn resume(&mut self) -> ConfigStatus {
        if self.state != EngineState::Paused {
            return self.record(ConfigStatus::Rejected);
        }
        #[cfg(feature = "esp32-log")]
        println!("[Engine.resume]");
        self.state = EngineState::Running;
        self.record(ConfigStatus::Applied)
    }

    /// Run every active segment on the next running service call,
    /// whatever its deadline
    pub fn trigger(&mut self) -> ConfigStatus {
        self.triggered = true;
        self.record(ConfigStatus::Applied)
    }

    /// Clear the buffer and push it to the strip right away.
    ///
    /// The state machine is left alone, so a running engine paints
    /// again on the next due segment.
    pub fn strip_off(&mut self) {
        self.buffer.clear();
        self.flush();
    }

    // Mode

    pub fn set_mode(&mut self, mode: ModeId) -> ConfigStatus {
        self.set_segment_mode(0, mode)
    }

    /// Change the mode of a segment and reset its runtime
    pub fn set_segment_mode(&mut self, index: usize, mode: ModeId) -> ConfigStatus {
        let Some(segment) = self.segments.get_mut(index) else {
            return self.record(ConfigStatus::Rejected);
        };
        segment.mode = mode;
        self.segments.reset_runtime(index, self.now_ms);
        #[cfg(feature = "esp32-log")]
        println!("[Engine.set_segment_mode] segment {}: {}", index, self.registry.name(mode));
        self.record(ConfigStatus::Applied)
    }

    pub fn mode(&self) -> ModeId {
        self.segment_mode(0).unwrap_or_default()
    }

    pub fn segment_mode(&self, index: usize) -> Option<ModeId> {
        self.segments.get(index).map(|segment| segment.mode)
    }

    pub const fn mode_count(&self) -> usize {
        self.registry.count()
    }

    pub fn mode_name(&self, mode: ModeId) -> &'static str {
        self.registry.name(mode)
    }

    /// Look a mode up by its display name
    pub fn parse_mode(&self, name: &str) -> Option<ModeId> {
        self.registry.parse_from_str(name)
    }

    /// Put a routine into the next free custom slot.
    ///
    /// With every slot taken the last one is replaced and
    /// [`Self::last_status`] reports [`ConfigStatus::Clamped`].
    pub fn register_custom_mode(&mut self, name: &'static str, effect: EffectFn) -> ModeId {
        let (id, status) = self.registry.register(name, effect);
        #[cfg(feature = "esp32-log")]
        println!("[Engine.register_custom_mode] {} -> {}: {:?}", name, id.raw(), status);
        self.record(status);
        id
    }

    /// Replace custom slot `index` (clamped to the last slot)
    pub fn set_custom_mode(&mut self, index: u8, name: &'static str, effect: EffectFn) -> ConfigStatus {
        let status = self.registry.set_custom(index, name, effect);
        self.record(status)
    }

    // Speed

    pub fn set_speed(&mut self, speed: u16) -> ConfigStatus {
        self.set_segment_speed(0, speed)
    }

    pub fn set_segment_speed(&mut self, index: usize, speed: u16) -> ConfigStatus {
        let Some(segment) = self.segments.get_mut(index) else {
            return self.record(ConfigStatus::Rejected);
        };
        segment.speed = clamp_speed(speed);
        let status = ConfigStatus::from_clamped(segment.speed != speed);
        self.record(status)
    }

    /// Raise the speed value of segment 0 by `step`.
    ///
    /// The value is a period, so a larger one animates slower.
    pub fn increase_speed(&mut self, step: u16) -> ConfigStatus {
        let speed = self.speed();
        self.set_speed(speed.saturating_add(step))
    }

    /// Lower the speed value of segment 0 by `step`
    pub fn decrease_speed(&mut self, step: u16) -> ConfigStatus {
        let speed = self.speed();
        self.set_speed(speed.saturating_sub(step))
    }

    pub fn speed(&self) -> u16 {
        self.segment_speed(0).unwrap_or(DEFAULT_SPEED)
    }

    pub fn segment_speed(&self, index: usize) -> Option<u16> {
        self.segments.get(index).map(|segment| segment.speed)
    }

    // Colors and options

    /// Set the first color of segment 0
    pub fn set_color(&mut self, color: u32) -> ConfigStatus {
        let Some(segment) = self.segments.get(0) else {
            return self.record(ConfigStatus::Rejected);
        };
        let mut colors = segment.colors;
        colors[0] = color;
        self.set_segment_colors(0, colors)
    }

    pub fn set_segment_colors(&mut self, index: usize, colors: [u32; NUM_COLORS]) -> ConfigStatus {
        let Some(segment) = self.segments.get_mut(index) else {
            return self.record(ConfigStatus::Rejected);
        };
        segment.colors = colors;
        self.record(ConfigStatus::Applied)
    }

    pub fn color(&self) -> u32 {
        self.segments.get(0).map_or(0, |segment| segment.colors[0])
    }

    pub fn set_segment_options(&mut self, index: usize, options: SegmentOptions) -> ConfigStatus {
        let Some(segment) = self.segments.get_mut(index) else {
            return self.record(ConfigStatus::Rejected);
        };
        segment.options = options;
        self.record(ConfigStatus::Applied)
    }

    // Segments

    /// Replace a segment wholesale and reset its runtime.
    ///
    /// The range is ordered and clamped into the strip and the speed
    /// clamped; either reports [`ConfigStatus::Clamped`].
    pub fn set_segment(&mut self, index: usize, segment: Segment) -> ConfigStatus {
        let status = self.segments.set(index, segment, self.length());
        if !status.is_rejected() {
            self.segments.reset_runtime(index, self.now_ms);
        }
        #[cfg(feature = "esp32-log")]
        println!("[Engine.set_segment] segment {}: {:?}", index, status);
        self.record(status)
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn runtime(&self, index: usize) -> Option<&SegmentRuntime> {
        self.segments.runtime(index)
    }

    /// Set how many segments are evaluated, clamped to `1..=30`
    pub fn set_num_segments(&mut self, count: usize) -> ConfigStatus {
        let status = self.segments.set_active(count);
        self.record(status)
    }

    pub const fn num_segments(&self) -> usize {
        self.segments.active()
    }

    /// Back to a single segment covering the strip with default settings
    pub fn reset_segments(&mut self) {
        self.segments = SegmentStore::new();
        let length = self.length();
        self.segments.set(
            0,
            Segment {
                stop: length.saturating_sub(1),
                ..Segment::default()
            },
            length,
        );
        self.segments.reset_runtimes(self.now_ms);
        self.record(ConfigStatus::Applied);
    }

    pub fn reset_segment_runtimes(&mut self) {
        self.segments.reset_runtimes(self.now_ms);
    }

    pub fn reset_segment_runtime(&mut self, index: usize) -> ConfigStatus {
        let status = self.segments.reset_runtime(index, self.now_ms);
        self.record(status)
    }

    /// Segment ran in the last service call
    pub fn is_frame(&self, index: usize) -> bool {
        self.runtime(index).is_some_and(SegmentRuntime::is_frame)
    }

    /// Segment finished a full animation cycle in the last service call
    pub fn is_cycle(&self, index: usize) -> bool {
        self.runtime(index).is_some_and(SegmentRuntime::is_cycle)
    }

    // Brightness

    pub fn set_brightness(&mut self, brightness: u8) -> ConfigStatus {
        self.brightness = brightness;
        self.record(ConfigStatus::Applied)
    }

    pub fn increase_brightness(&mut self, step: u8) -> ConfigStatus {
        self.set_brightness(self.brightness.saturating_add(step))
    }

    pub fn decrease_brightness(&mut self, step: u8) -> ConfigStatus {
        self.set_brightness(self.brightness.saturating_sub(step))
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    // Strip length

    /// Change the strip length, clamped to `1..=LEDS`.
    ///
    /// Pixels past the new end are turned off, every segment is clamped
    /// into the new range and restarts from a fresh runtime.
    pub fn set_length(&mut self, length: u16) -> ConfigStatus {
        let stored = self.buffer.set_len(length);
        self.segments.clamp_all(stored);
        self.segments.reset_runtimes(self.now_ms);
        self.record(ConfigStatus::from_clamped(stored != length))
    }

    pub fn increase_length(&mut self, step: u16) -> ConfigStatus {
        self.set_length(self.length().saturating_add(step))
    }

    pub fn decrease_length(&mut self, step: u16) -> ConfigStatus {
        self.set_length(self.length().saturating_sub(step))
    }

    pub fn length(&self) -> u16 {
        self.buffer.len()
    }

    // Inputs and outputs

    /// External level (0-255) read by level-driven modes
    pub fn set_level(&mut self, level: u8) -> ConfigStatus {
        self.level = level;
        self.record(ConfigStatus::Applied)
    }

    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Restart the random sequence effects draw from
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    pub const fn buffer(&self) -> &FrameBuffer<LEDS> {
        &self.buffer
    }

    /// Sum of all channel values currently in the buffer (power estimate)
    pub fn intensity_sum(&self) -> u32 {
        self.buffer.intensity_sum()
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
