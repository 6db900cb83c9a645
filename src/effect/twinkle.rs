//! Twinkles, sparkles and other randomly placed pixels

use embassy_time::Duration;

use super::{EffectContext, scheme};
use crate::{
    color::{BLACK, WHITE, color_blend, color_wheel},
    math8::sin8,
};

/// Phase flag in the routine-owned bits of `aux_param2`
const FLASHING: u8 = 0x01;
const SNOW_FLASH_MS: u64 = 20;
const HYPER_SPARKS: u8 = 8;

/// Light random pixels one at a time, then start over on a clean segment
fn twinkle(ctx: &mut EffectContext<'_>, color: u32, background: u32) -> Duration {
    if ctx.runtime.counter_mode_step == 0 {
        ctx.fill(background);
        let min_leds = ctx.len() / 4 + 1;
        let count = ctx.random16_between(min_leds, min_leds.saturating_mul(2));
        ctx.runtime.counter_mode_step = u32::from(count);
        ctx.set_cycle();
    }

    let index = ctx.start() + ctx.random16_below(ctx.len());
    ctx.set_pixel(index, color);
    ctx.runtime.counter_mode_step = ctx.runtime.counter_mode_step.saturating_sub(1);
    ctx.speed_div(u32::from(ctx.len()))
}

pub(crate) fn twinkle_color(ctx: &mut EffectContext<'_>) -> Duration {
    let (c0, c1) = (ctx.color(0), ctx.color(1));
    twinkle(ctx, c0, c1)
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn twinkle_rainbow(ctx: &mut EffectContext<'_>) -> Duration {
    let color = color_wheel(ctx.runtime.counter_mode_call as u8);
    let background = ctx.color(1);
    twinkle(ctx, color, background)
}

pub(crate) fn twinkle_scheme<const S: u8>(ctx: &mut EffectContext<'_>) -> Duration {
    let color = scheme::<S>().color(ctx.random8());
    let background = ctx.color(1);
    twinkle(ctx, color, background)
}

pub(crate) fn twinkle_random(ctx: &mut EffectContext<'_>) -> Duration {
    let color = color_wheel(ctx.random8());
    let background = ctx.color(1);
    twinkle(ctx, color, background)
}

/// Random elements light up and fade away
fn twinkle_fade(ctx: &mut EffectContext<'_>, color: u32) -> Duration {
    ctx.fade_out();
    if ctx.random8_below(3) == 0 {
        let first = ctx.random_element_start();
        ctx.fill_range(first, ctx.size(), color);
        ctx.set_cycle();
    }
    ctx.speed_div(8)
}

pub(crate) fn twinkle_fade_color(ctx: &mut EffectContext<'_>) -> Duration {
    let color = ctx.color(0);
    twinkle_fade(ctx, color)
}

pub(crate) fn twinkle_fade_random(ctx: &mut EffectContext<'_>) -> Duration {
    let color = color_wheel(ctx.random8());
    twinkle_fade(ctx, color)
}

/// One element at a time lit in `spark` over `background`
#[allow(clippy::cast_possible_truncation)]
fn sparkle(ctx: &mut EffectContext<'_>, background: u32, spark: u32) -> Duration {
    if ctx.runtime.counter_mode_call == 0 {
        ctx.fill(background);
    }
    let size = ctx.size();
    ctx.fill_range(ctx.start().saturating_add(ctx.runtime.aux_param3), size, background);
    let first = ctx.random_element_start();
    ctx.runtime.aux_param3 = first - ctx.start();
    ctx.fill_range(first, size, spark);
    ctx.set_cycle();
    ctx.speed_div(32)
}

pub(crate) fn sparkle_color(ctx: &mut EffectContext<'_>) -> Duration {
    let (c0, c1) = (ctx.color(0), ctx.color(1));
    sparkle(ctx, c1, c0)
}

pub(crate) fn flash_sparkle(ctx: &mut EffectContext<'_>) -> Duration {
    let c0 = ctx.color(0);
    sparkle(ctx, c0, WHITE)
}

pub(crate) fn hyper_sparkle(ctx: &mut EffectContext<'_>) -> Duration {
    ctx.fill(ctx.color(0));
    for _ in 0..HYPER_SPARKS {
        let first = ctx.random_element_start();
        ctx.fill_range(first, ctx.size(), WHITE);
    }
    ctx.set_cycle();
    ctx.speed_div(32)
}

/// A short white flash on a random element, then a pause of `speed` ms
pub(crate) fn snow_sparkle(ctx: &mut EffectContext<'_>) -> Duration {
    let background = ctx.color(0);
    let size = ctx.size();
    if ctx.runtime.counter_mode_call == 0 {
        ctx.fill(background);
    }

    if ctx.runtime.aux_param2 & FLASHING != 0 {
        ctx.fill_range(ctx.start().saturating_add(ctx.runtime.aux_param3), size, background);
        ctx.runtime.aux_param2 &= !FLASHING;
        ctx.set_cycle();
        return ctx.speed_div(1);
    }

    let first = ctx.random_element_start();
    ctx.runtime.aux_param3 = first - ctx.start();
    ctx.fill_range(first, size, WHITE);
    ctx.runtime.aux_param2 |= FLASHING;
    Duration::from_millis(SNOW_FLASH_MS)
}

/// Warm, gently pulsing twinkles; every element has its own phase and rate
/// derived from a fixed pseudo-random sequence
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn twinkle_fox(ctx: &mut EffectContext<'_>) -> Duration {
    let (c0, c1, c2) = (ctx.color(0), ctx.color(1), ctx.color(2));
    let size = ctx.size();
    let call = ctx.runtime.counter_mode_call;
    let mut seed: u16 = 0;

    let mut offset = 0;
    while offset < ctx.len() {
        seed = seed.wrapping_mul(2053).wrapping_add(13849);
        let init = (seed.wrapping_add(seed >> 8) & 0xFF) as u8;
        seed = seed.wrapping_mul(2053).wrapping_add(13849);
        let increment = (((seed.wrapping_add(seed >> 8)) & 0x07) + 1) * 2;

        let blend_index = u32::from(init).wrapping_add(call.wrapping_mul(u32::from(increment))) as u8;
        let amount = sin8(blend_index);

        let color = if c0 == BLACK {
            color_blend(color_wheel(init), c1, amount)
        } else if c2 != BLACK && init >= 128 {
            color_blend(c2, c1, amount)
        } else {
            color_blend(c0, c1, amount)
        };
        ctx.fill_range(ctx.start() + offset, size, color);
        offset = offset.saturating_add(size);
    }

    ctx.set_cycle();
    ctx.speed_div(32)
}

/// Drops fall from the head of the segment and fade as they travel
pub(crate) fn rain(ctx: &mut EffectContext<'_>) -> Duration {
    ctx.fade_out();
    let head = ctx.shift_forward();
    if ctx.random8_below(6) == 0 {
        let drop = match ctx.color(0) {
            BLACK => color_wheel(ctx.random8()),
            color => color,
        };
        ctx.set_pixel(head, drop);
        ctx.set_cycle();
    }
    ctx.speed_div(u32::from(ctx.len()))
}

/// Random pixels switch to the next segment color until all have changed
pub(crate) fn block_dissolve(ctx: &mut EffectContext<'_>) -> Duration {
    let target = ctx.color(usize::from(ctx.runtime.aux_param % 3));
    let len = ctx.len();

    for _ in 0..len {
        let index = ctx.start() + ctx.random16_below(len);
        let before = ctx.pixel(index);
        ctx.set_pixel(index, target);
        if ctx.pixel(index) != before {
            return ctx.speed_div(u32::from(len));
        }
    }

    // random picks kept landing on finished pixels, finish the block
    ctx.fill(target);
    ctx.runtime.aux_param = (ctx.runtime.aux_param + 1) % 3;
    if ctx.runtime.aux_param == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(u32::from(len))
}
