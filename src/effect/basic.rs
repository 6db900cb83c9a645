//! Whole-segment modes: static, blinking, breathing and fading

use embassy_time::Duration;

use super::{EffectContext, scheme};
use crate::{
    color::{color_blend, color_wheel},
    math8::scale8,
};

const STROBE_FLASH_MS: u64 = 20;
const HEARTBEAT_FRAME_MS: u32 = 20;
const HEARTBEAT_MIN_PERIOD_MS: u32 = 200;

pub(crate) fn static_color(ctx: &mut EffectContext<'_>) -> Duration {
    ctx.fill(ctx.color(0));
    ctx.set_cycle();
    ctx.speed_div(1)
}

/// Alternate between `on` and `off`; the strobe variant keeps `on` short
fn blink_between(ctx: &mut EffectContext<'_>, on: u32, off: u32, strobe: bool) -> Duration {
    let speed = u64::from(ctx.speed());
    let (on, off) = if ctx.is_reverse() { (off, on) } else { (on, off) };

    if ctx.runtime.counter_mode_call & 1 == 1 {
        ctx.fill(off);
        ctx.set_cycle();
        Duration::from_millis(if strobe { speed.saturating_sub(STROBE_FLASH_MS) } else { speed / 2 })
    } else {
        ctx.fill(on);
        Duration::from_millis(if strobe { STROBE_FLASH_MS } else { speed / 2 })
    }
}

/// Wheel position that advances by one every call
#[allow(clippy::cast_possible_truncation)]
fn call_hue(ctx: &EffectContext<'_>) -> u8 {
    ctx.runtime.counter_mode_call as u8
}

pub(crate) fn blink(ctx: &mut EffectContext<'_>) -> Duration {
    let (on, off) = (ctx.color(0), ctx.color(1));
    blink_between(ctx, on, off, false)
}

pub(crate) fn blink_rainbow(ctx: &mut EffectContext<'_>) -> Duration {
    let color = color_wheel(call_hue(ctx));
    let off = ctx.color(1);
    blink_between(ctx, color, off, false)
}

pub(crate) fn blink_scheme<const S: u8>(ctx: &mut EffectContext<'_>) -> Duration {
    let color = scheme::<S>().color(call_hue(ctx));
    let off = ctx.color(1);
    blink_between(ctx, color, off, false)
}

pub(crate) fn strobe(ctx: &mut EffectContext<'_>) -> Duration {
    let (on, off) = (ctx.color(0), ctx.color(1));
    blink_between(ctx, on, off, true)
}

pub(crate) fn strobe_rainbow(ctx: &mut EffectContext<'_>) -> Duration {
    let color = color_wheel(call_hue(ctx));
    let off = ctx.color(1);
    blink_between(ctx, color, off, true)
}

pub(crate) fn strobe_scheme<const S: u8>(ctx: &mut EffectContext<'_>) -> Duration {
    let color = scheme::<S>().color(call_hue(ctx));
    let off = ctx.color(1);
    blink_between(ctx, color, off, true)
}

/// Bursts of short flashes; the burst length grows with the hundreds of
/// `speed`, the pause with its last digit
pub(crate) fn multi_strobe(ctx: &mut EffectContext<'_>) -> Duration {
    let speed = u32::from(ctx.speed());
    ctx.fill(ctx.color(1));

    let mut delay = 200 + (9 - speed % 10) * 100;
    let count = 2 * (speed / 100 + 1);
    let step = ctx.runtime.counter_mode_step;
    if step < count {
        if step & 1 == 0 {
            ctx.fill(ctx.color(0));
            delay = 20;
        } else {
            delay = 50;
        }
    }

    ctx.runtime.counter_mode_step = (step + 1) % (count + 1);
    if ctx.runtime.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    Duration::from_millis(u64::from(delay))
}

/// "Standby" breathing; the delay table gives the slow, natural rhythm
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn breath(ctx: &mut EffectContext<'_>) -> Duration {
    let step = ctx.runtime.counter_mode_step;
    let lum = if step > 255 { 511 - step } else { step };

    let delay: u64 = match lum {
        15 => 970,
        0..=25 => 38,
        26..=50 => 36,
        51..=75 => 28,
        76..=100 => 20,
        101..=125 => 14,
        126..=150 => 11,
        _ => 10,
    };

    let color = color_blend(ctx.color(1), ctx.color(0), lum as u8);
    ctx.fill(color);

    ctx.runtime.counter_mode_step += 2;
    if ctx.runtime.counter_mode_step > 512 - 15 {
        ctx.runtime.counter_mode_step = 15;
        ctx.set_cycle();
    }
    Duration::from_millis(delay)
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn fade(ctx: &mut EffectContext<'_>) -> Duration {
    let step = ctx.runtime.counter_mode_step;
    let lum = if step > 255 { 511 - step } else { step };
    let color = color_blend(ctx.color(1), ctx.color(0), lum as u8);
    ctx.fill(color);

    ctx.runtime.counter_mode_step += 4;
    if ctx.runtime.counter_mode_step > 511 {
        ctx.runtime.counter_mode_step = 0;
        ctx.set_cycle();
    }
    ctx.speed_div(128)
}

/// Fade through all three segment colors in turn
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn trifade(ctx: &mut EffectContext<'_>) -> Duration {
    let from = usize::from(ctx.runtime.aux_param % 3);
    let to = (from + 1) % 3;
    let color = color_blend(ctx.color(from), ctx.color(to), ctx.runtime.counter_mode_step as u8);
    ctx.fill(color);

    ctx.runtime.counter_mode_step += 4;
    if ctx.runtime.counter_mode_step >= 256 {
        ctx.runtime.counter_mode_step = 0;
        ctx.runtime.aux_param = to as u8;
        if ctx.runtime.aux_param == 0 {
            ctx.set_cycle();
        }
    }
    ctx.speed_div(128)
}

pub(crate) fn random_color(ctx: &mut EffectContext<'_>) -> Duration {
    ctx.runtime.aux_param = ctx.random_wheel_index(ctx.runtime.aux_param);
    ctx.fill(color_wheel(ctx.runtime.aux_param));
    ctx.set_cycle();
    ctx.speed_div(1)
}

/// Every pixel gets a random color once, then one pixel changes per call
pub(crate) fn single_dynamic(ctx: &mut EffectContext<'_>) -> Duration {
    if ctx.runtime.counter_mode_call == 0 {
        for index in ctx.start()..=ctx.stop() {
            let color = color_wheel(ctx.random8());
            ctx.set_pixel(index, color);
        }
    }

    let index = ctx.start() + ctx.random16_below(ctx.len());
    let color = color_wheel(ctx.random8());
    ctx.set_pixel(index, color);
    ctx.set_cycle();
    ctx.speed_div(1)
}

pub(crate) fn multi_dynamic(ctx: &mut EffectContext<'_>) -> Duration {
    for index in ctx.start()..=ctx.stop() {
        let color = color_wheel(ctx.random8());
        ctx.set_pixel(index, color);
    }
    ctx.set_cycle();
    ctx.speed_div(1)
}

/// Linear decay pulse of `width` ms starting at `at` ms into the beat
#[allow(clippy::cast_possible_truncation)]
const fn pulse(t: u32, at: u32, width: u32) -> u8 {
    if t < at || t - at >= width || width == 0 {
        return 0;
    }
    (255 - (t - at) * 255 / width) as u8
}

/// Double "lub-dub" pulse; one beat lasts `speed` ms
pub(crate) fn heartbeat(ctx: &mut EffectContext<'_>) -> Duration {
    let period = u32::from(ctx.speed()).max(HEARTBEAT_MIN_PERIOD_MS);
    let t = ctx.runtime.counter_mode_step;

    let lub = pulse(t, 0, period / 4);
    let dub = scale8(pulse(t, period * 3 / 10, period / 4), 153);
    let color = color_blend(ctx.color(1), ctx.color(0), lub.max(dub));
    ctx.fill(color);

    ctx.runtime.counter_mode_step += HEARTBEAT_FRAME_MS;
    if ctx.runtime.counter_mode_step >= period {
        ctx.runtime.counter_mode_step = 0;
        ctx.set_cycle();
    }
    Duration::from_millis(u64::from(HEARTBEAT_FRAME_MS))
}
