//! Level-driven modes: bouncing balls, popcorn, filling and the VU meter

use embassy_time::Duration;

use super::EffectContext;
use crate::color::{BLACK, GREEN, RED, YELLOW, color_blend};

const GRAVITY: f32 = 9.81;
/// Virtual milliseconds simulated per call; the real delay is `speed / 50`
const SIM_FRAME_MS: u32 = 20;
const SIM_FRAME_DIVISOR: u32 = 50;

const BALL_COUNT: usize = 3;
const BALL_DAMPING: [f32; BALL_COUNT] = [0.90, 0.87, 0.84];
const BALL_PHASE_MS: [u32; BALL_COUNT] = [0, 700, 1400];
/// A ball is thrown again once its bounce speed falls below this share
const BALL_RESTART_RATIO: f32 = 0.01;
const MAX_BOUNCES: u32 = 64;

const VU_PEAK_HOLD_CALLS: u8 = 12;

/// Filler-up swaps its two colors after every full glass
const SWAPPED: u8 = 0x01;

/// Height (0.0-1.0) of a ball dropped from 1.0 after `t` seconds.
///
/// Each bounce keeps `damping` of the impact speed; once the speed is spent
/// the ball restarts from the top, so the motion is periodic in `t`.
fn ball_height(t: f32, damping: f32) -> f32 {
    let impact = libm::sqrtf(2.0 * GRAVITY);

    let mut period = 0.0;
    let mut speed = impact;
    let mut bounces = 0;
    while speed >= impact * BALL_RESTART_RATIO && bounces < MAX_BOUNCES {
        period += 2.0 * speed / GRAVITY;
        speed *= damping;
        bounces += 1;
    }
    if period <= 0.0 {
        return 0.0;
    }

    let mut t = libm::fmodf(t, period);
    let mut speed = impact;
    for _ in 0..bounces {
        let flight = 2.0 * speed / GRAVITY;
        if t < flight {
            return (speed * t - 0.5 * GRAVITY * t * t).max(0.0);
        }
        t -= flight;
        speed *= damping;
    }
    0.0
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bouncing_balls(ctx: &mut EffectContext<'_>, colors: [u32; BALL_COUNT]) -> Duration {
    let clock = ctx.runtime.counter_mode_step;
    let top = f32::from(ctx.len() - 1);
    ctx.fill(BLACK);

    for ball in 0..BALL_COUNT {
        let t = clock.wrapping_add(BALL_PHASE_MS[ball]) as f32 / 1000.0;
        let height = ball_height(t, BALL_DAMPING[ball]);
        let offset = libm::roundf(height * top) as u16;
        ctx.set_directed(offset, colors[ball]);
    }

    ctx.runtime.counter_mode_step = clock.wrapping_add(SIM_FRAME_MS);
    ctx.set_cycle();
    ctx.speed_div(SIM_FRAME_DIVISOR)
}

pub(crate) fn bouncing_balls_single(ctx: &mut EffectContext<'_>) -> Duration {
    let color = ctx.color(0);
    bouncing_balls(ctx, [color; BALL_COUNT])
}

pub(crate) fn bouncing_balls_colored(ctx: &mut EffectContext<'_>) -> Duration {
    let colors = [ctx.color(0), ctx.color(1), ctx.color(2)];
    bouncing_balls(ctx, colors)
}

/// A kernel pops up to a random height and falls back.
///
/// `aux_param` marks a kernel in flight, `aux_param3` holds its apex in
/// pixels and the step counter its flight time in virtual milliseconds.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub(crate) fn popcorn(ctx: &mut EffectContext<'_>) -> Duration {
    let len = ctx.len();
    ctx.fade_out();

    if ctx.runtime.aux_param == 0 && ctx.random8_below(4) == 0 {
        ctx.runtime.aux_param = 1;
        ctx.runtime.aux_param3 = ctx.random16_between(len / 3, len).max(1);
        ctx.runtime.counter_mode_step = 0;
    }

    if ctx.runtime.aux_param != 0 {
        // gravity scales with the strip so a full-height pop lasts ~2 s
        let gravity = 2.0 * f32::from(len);
        let apex = f32::from(ctx.runtime.aux_param3);
        let launch = libm::sqrtf(2.0 * gravity * apex);
        let t = ctx.runtime.counter_mode_step as f32 / 1000.0;
        let height = launch * t - 0.5 * gravity * t * t;

        if height < 0.0 {
            ctx.runtime.aux_param = 0;
            ctx.set_cycle();
        } else {
            let color = ctx.color(0);
            ctx.set_directed(libm::roundf(height) as u16, color);
            ctx.runtime.counter_mode_step += SIM_FRAME_MS;
        }
    }
    ctx.speed_div(SIM_FRAME_DIVISOR)
}

/// Drops fall one at a time and pile up until the segment is full
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn filler_up(ctx: &mut EffectContext<'_>) -> Duration {
    let len = ctx.len();
    if ctx.runtime.counter_mode_call == 0 {
        ctx.runtime.aux_param3 = len - 1;
    }

    let mut level = ctx.runtime.counter_mode_step as u16;
    if level >= len {
        ctx.runtime.aux_param2 ^= SWAPPED;
        if ctx.runtime.aux_param2 & SWAPPED == 0 {
            ctx.set_cycle();
        }
        level = 0;
        ctx.runtime.aux_param3 = len - 1;
    }

    let (full, empty) = if ctx.runtime.aux_param2 & SWAPPED == 0 {
        (ctx.color(0), ctx.color(1))
    } else {
        (ctx.color(1), ctx.color(0))
    };
    for offset in 0..len {
        ctx.set_directed(offset, if offset < level { full } else { empty });
    }

    let drop = ctx.runtime.aux_param3.max(level);
    ctx.set_directed(drop, full);
    if drop == level {
        level += 1;
        ctx.runtime.aux_param3 = len - 1;
    } else {
        ctx.runtime.aux_param3 = drop - 1;
    }
    ctx.runtime.counter_mode_step = u32::from(level);
    ctx.speed_div(u32::from(len))
}

/// Bar graph of the external level with a falling peak marker
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn vu_meter(ctx: &mut EffectContext<'_>) -> Duration {
    let len = ctx.len();
    let lit = ((u32::from(ctx.level()) * u32::from(len) + 127) / 255) as u16;

    let peak = ctx.runtime.aux_param3;
    if lit >= peak {
        ctx.runtime.aux_param3 = lit;
        ctx.runtime.aux_param = 0;
    } else {
        ctx.runtime.aux_param += 1;
        if ctx.runtime.aux_param >= VU_PEAK_HOLD_CALLS {
            ctx.runtime.aux_param3 = peak - 1;
            ctx.runtime.aux_param = 0;
        }
    }

    let top = u32::from(len.saturating_sub(1)).max(1);
    for offset in 0..len {
        let color = if offset < lit {
            let position = (u32::from(offset) * 255 / top) as u8;
            if position < 128 {
                color_blend(GREEN, YELLOW, position * 2)
            } else {
                color_blend(YELLOW, RED, (position - 128) * 2)
            }
        } else {
            BLACK
        };
        ctx.set_directed(offset, color);
    }

    let peak = ctx.runtime.aux_param3;
    if peak > 0 {
        let marker = ctx.color(0);
        ctx.set_directed(peak - 1, marker);
    }
    ctx.set_cycle();
    ctx.speed_div(64)
}
