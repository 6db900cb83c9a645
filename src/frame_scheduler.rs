//! Service timing helpers.
//!
//! The engine never sleeps on its own. Every service call reports how long
//! the host may wait before the next segment is due.
//!
//! # Usage
//!
//! ```ignore
//! loop {
//!     let report = engine.service(Instant::now());
//!     Timer::after(report.sleep_duration).await;
//! }
//! ```

use embassy_time::{Duration, Instant};

/// Wait suggested while the engine is not running.
///
/// Short enough that queued intents are picked up promptly.
pub const IDLE_POLL: Duration = Duration::from_millis(20);

/// Longest delay a routine can request; keeps deadlines comparable on the
/// wrapping millisecond clock.
pub(crate) const MAX_DELAY_MS: u32 = 0x7FFF_FFFF;

/// Result of a service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceReport {
    /// The buffer was pushed to the output driver
    pub flushed: bool,
    /// Number of segment routines that ran
    pub executed: usize,
    /// Time at which the earliest segment is due
    pub next_deadline: Instant,
    /// How long to wait until then (zero if already due)
    pub sleep_duration: Duration,
}

impl ServiceReport {
    /// Report for a call that rendered nothing and has nothing scheduled
    pub(crate) fn idle(now: Instant) -> Self {
        Self {
            flushed: false,
            executed: 0,
            next_deadline: now + IDLE_POLL,
            sleep_duration: IDLE_POLL,
        }
    }
}

/// Millisecond clock value as used by segment deadlines (wraps at 2^32)
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn millis32(now: Instant) -> u32 {
    now.as_millis() as u32
}

/// Whether `deadline` has been reached, correct across clock wraparound
#[allow(clippy::cast_possible_wrap)]
pub(crate) const fn is_due(now: u32, deadline: u32) -> bool {
    now.wrapping_sub(deadline) as i32 >= 0
}

/// Time left until `deadline`, zero when already due
pub(crate) fn time_until(now: u32, deadline: u32) -> Duration {
    if is_due(now, deadline) {
        Duration::from_millis(0)
    } else {
        Duration::from_millis(u64::from(deadline.wrapping_sub(now)))
    }
}
