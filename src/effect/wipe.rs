//! Wipes and scanners that sweep across the segment

use embassy_time::Duration;

use super::EffectContext;
use crate::color::color_wheel;

/// Light the segment pixel by pixel with `first`, then with `second`.
///
/// `flip_second` runs the second pass in the opposite direction.
#[allow(clippy::cast_possible_truncation)]
fn color_wipe(ctx: &mut EffectContext<'_>, first: u32, second: u32, flip_second: bool) -> Duration {
    let len = u32::from(ctx.len());
    let step = ctx.runtime.counter_mode_step;

    if step < len {
        ctx.set_directed(step as u16, first);
    } else {
        let offset = (step - len) as u16;
        if flip_second {
            let index = if ctx.is_reverse() {
                ctx.start() + offset
            } else {
                ctx.stop() - offset
            };
            ctx.set_pixel(index, second);
        } else {
            ctx.set_directed(offset, second);
        }
    }

    ctx.runtime.counter_mode_step = (step + 1) % (len * 2);
    if ctx.runtime.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(len * 2)
}

pub(crate) fn wipe(ctx: &mut EffectContext<'_>) -> Duration {
    let (first, second) = (ctx.color(0), ctx.color(1));
    color_wipe(ctx, first, second, false)
}

pub(crate) fn wipe_inverse(ctx: &mut EffectContext<'_>) -> Duration {
    let (first, second) = (ctx.color(1), ctx.color(0));
    color_wipe(ctx, first, second, false)
}

pub(crate) fn wipe_reverse(ctx: &mut EffectContext<'_>) -> Duration {
    let (first, second) = (ctx.color(0), ctx.color(1));
    color_wipe(ctx, first, second, true)
}

pub(crate) fn wipe_reverse_inverse(ctx: &mut EffectContext<'_>) -> Duration {
    let (first, second) = (ctx.color(1), ctx.color(0));
    color_wipe(ctx, first, second, true)
}

/// Wipe with a new random color on every pass
fn wipe_random_color(ctx: &mut EffectContext<'_>, flip_second: bool) -> Duration {
    if ctx.runtime.counter_mode_step % u32::from(ctx.len()) == 0 {
        ctx.runtime.aux_param = ctx.random_wheel_index(ctx.runtime.aux_param);
    }
    let color = color_wheel(ctx.runtime.aux_param);
    color_wipe(ctx, color, color, flip_second) * 2
}

pub(crate) fn wipe_random(ctx: &mut EffectContext<'_>) -> Duration {
    wipe_random_color(ctx, false)
}

pub(crate) fn sweep_random(ctx: &mut EffectContext<'_>) -> Duration {
    wipe_random_color(ctx, true)
}

/// Bounce a block of `size()` pixels back and forth over the background
fn scan(ctx: &mut EffectContext<'_>, dual: bool) -> Duration {
    let (fg, bg) = (ctx.color(0), ctx.color(1));
    let size = ctx.size();
    let len = ctx.len();
    ctx.fill(bg);

    #[allow(clippy::cast_possible_truncation)]
    let step = ctx.runtime.counter_mode_step as u16;
    for i in 0..size {
        let offset = step.saturating_add(i);
        if offset >= len {
            break;
        }
        if ctx.is_reverse() || dual {
            ctx.set_pixel(ctx.stop() - offset, fg);
        }
        if !ctx.is_reverse() || dual {
            ctx.set_pixel(ctx.start() + offset, fg);
        }
    }

    let backwards = ctx.runtime.aux_param != 0;
    let step = if backwards {
        step.saturating_sub(1)
    } else {
        step + 1
    };
    ctx.runtime.counter_mode_step = u32::from(step);
    if step == 0 {
        ctx.runtime.aux_param = 0;
        ctx.set_cycle();
    }
    if step >= len.saturating_sub(size) {
        ctx.runtime.aux_param = 1;
    }
    ctx.speed_div(u32::from(len) * 2)
}

pub(crate) fn single_scan(ctx: &mut EffectContext<'_>) -> Duration {
    scan(ctx, false)
}

pub(crate) fn dual_scan(ctx: &mut EffectContext<'_>) -> Duration {
    scan(ctx, true)
}
