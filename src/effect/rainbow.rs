//! Hue cycling modes

use embassy_time::Duration;

use super::{EffectContext, scheme};
use crate::color::color_wheel;

/// Hue of pixel `i` when the full wheel is spread over `len` pixels
#[allow(clippy::cast_possible_truncation)]
fn spread_hue(i: u16, len: u16, step: u32) -> u8 {
    ((u32::from(i) * 256 / u32::from(len.max(1))) + step) as u8
}

/// Advance the 0-255 step counter, flagging a cycle on wrap
fn advance_hue(ctx: &mut EffectContext<'_>) {
    ctx.runtime.counter_mode_step = (ctx.runtime.counter_mode_step + 1) & 0xFF;
    if ctx.runtime.counter_mode_step == 0 {
        ctx.set_cycle();
    }
}

/// Whole segment cycles through the color wheel
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn rainbow(ctx: &mut EffectContext<'_>) -> Duration {
    let color = color_wheel(ctx.runtime.counter_mode_step as u8);
    ctx.fill(color);
    advance_hue(ctx);
    ctx.speed_div(256)
}

/// The color wheel spread over the segment, rotating
pub(crate) fn rainbow_cycle(ctx: &mut EffectContext<'_>) -> Duration {
    let len = ctx.len();
    let step = ctx.runtime.counter_mode_step;
    for i in 0..len {
        ctx.set_offset(i, color_wheel(spread_hue(i, len, step)));
    }
    advance_hue(ctx);
    ctx.speed_div(256)
}

/// A color scheme spread over the segment, rotating
pub(crate) fn scheme_cycle<const S: u8>(ctx: &mut EffectContext<'_>) -> Duration {
    let scheme = scheme::<S>();
    let len = ctx.len();
    let step = ctx.runtime.counter_mode_step;
    for i in 0..len {
        ctx.set_directed(i, scheme.color(spread_hue(i, len, step)));
    }
    advance_hue(ctx);
    ctx.speed_div(256)
}
