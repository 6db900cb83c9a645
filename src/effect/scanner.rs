//! Scanners, comets and other moving eyes

use embassy_time::Duration;

use super::EffectContext;
use crate::color::{BLACK, color_wheel};

const ICU_BLINK: Duration = Duration::from_millis(200);
const ICU_MIN_PAUSE_MS: u64 = 1000;
const ICU_PAUSE_SPREAD_MS: u16 = 2000;

/// Segment color `index`, falling back to the first color when unset
fn color_or_primary(ctx: &EffectContext<'_>, index: usize) -> u32 {
    match ctx.color(index) {
        BLACK => ctx.color(0),
        color => color,
    }
}

/// Single eye sweeping back and forth, leaving a fading trail
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn larson_scanner(ctx: &mut EffectContext<'_>) -> Duration {
    let len = u32::from(ctx.len());
    let step = ctx.runtime.counter_mode_step;
    let color = ctx.color(0);
    ctx.fade_out();

    let offset = if step < len { step } else { len * 2 - step - 2 };
    ctx.set_directed(offset as u16, color);

    ctx.runtime.counter_mode_step = step + 1;
    if ctx.runtime.counter_mode_step >= (len * 2).saturating_sub(2) {
        ctx.runtime.counter_mode_step = 0;
        ctx.set_cycle();
    }
    ctx.speed_div(len * 2)
}

/// Eye running in one direction with a fading tail
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn comet(ctx: &mut EffectContext<'_>) -> Duration {
    let len = u32::from(ctx.len());
    let color = ctx.color(0);
    ctx.fade_out();
    ctx.set_directed(ctx.runtime.counter_mode_step as u16, color);

    ctx.runtime.counter_mode_step = (ctx.runtime.counter_mode_step + 1) % len;
    if ctx.runtime.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(len)
}

/// Move a `width`-pixel block one pixel and bounce at the ends.
///
/// Position lives in `aux_param3`, direction in `aux_param`.
fn bounce(ctx: &mut EffectContext<'_>, width: u16) -> u16 {
    let limit = ctx.len().saturating_sub(width);
    let position = if ctx.runtime.aux_param == 0 {
        ctx.runtime.aux_param3.saturating_add(1)
    } else {
        ctx.runtime.aux_param3.saturating_sub(1)
    }
    .min(limit);

    ctx.runtime.aux_param3 = position;
    if position == 0 {
        ctx.runtime.aux_param = 0;
        ctx.set_cycle();
    } else if position >= limit {
        ctx.runtime.aux_param = 1;
    }
    position
}

/// Two eyes bouncing in mirror image
pub(crate) fn dual_larson(ctx: &mut EffectContext<'_>) -> Duration {
    let size = ctx.size();
    let (first, second) = (ctx.color(0), color_or_primary(ctx, 2));
    let position = bounce(ctx, size);
    ctx.fade_out();

    ctx.fill_range(ctx.start() + position, size, first);
    let mirrored = (ctx.stop() + 1).saturating_sub(position + size);
    ctx.fill_range(mirrored, size, second);
    ctx.speed_div(u32::from(ctx.len()) * 2)
}

/// Bouncing eye that changes to a random color every step
pub(crate) fn rainbow_larson(ctx: &mut EffectContext<'_>) -> Duration {
    let size = ctx.size();
    let position = bounce(ctx, size);
    ctx.fade_out();

    let color = color_wheel(ctx.random8());
    ctx.fill_range(ctx.start() + position, size, color);
    ctx.speed_div(u32::from(ctx.len()) * 2)
}

/// Wide bouncing eye, like the car
pub(crate) fn kitt(ctx: &mut EffectContext<'_>) -> Duration {
    let width = ctx.size() * 2;
    let position = bounce(ctx, width);
    ctx.fade_out();

    let color = ctx.color(0);
    for offset in position..position.saturating_add(width) {
        ctx.set_directed(offset, color);
    }
    ctx.speed_div(u32::from(ctx.len()))
}

/// A pair of eyes that glance around and blink now and then
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn icu(ctx: &mut EffectContext<'_>) -> Duration {
    let color = ctx.color(0);
    let half = ctx.len() / 2;
    let mut eye = ctx.runtime.counter_mode_step as u16;

    if ctx.runtime.counter_mode_call == 0 {
        ctx.fill(BLACK);
    }
    ctx.set_offset(eye, color);
    ctx.set_offset(eye + half, color);

    if ctx.runtime.aux_param3 == eye {
        if ctx.random8_below(6) == 0 {
            ctx.set_offset(eye, BLACK);
            ctx.set_offset(eye + half, BLACK);
            return ICU_BLINK;
        }
        ctx.runtime.aux_param3 = ctx.random16_below(half);
        ctx.set_cycle();
        let pause = ICU_MIN_PAUSE_MS + u64::from(ctx.random16_below(ICU_PAUSE_SPREAD_MS));
        return Duration::from_millis(pause);
    }

    ctx.set_offset(eye, BLACK);
    ctx.set_offset(eye + half, BLACK);
    if ctx.runtime.aux_param3 > eye {
        eye += 1;
    } else {
        eye -= 1;
    }
    ctx.runtime.counter_mode_step = u32::from(eye);
    ctx.set_offset(eye, color);
    ctx.set_offset(eye + half, color);
    ctx.speed_div(u32::from(ctx.len()))
}

/// Up to three comets launched at random moments.
///
/// Slot positions are stored as `offset + 1` (0 = idle): the first two in
/// the halves of the step counter, the third in `aux_param3`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn multi_comet(ctx: &mut EffectContext<'_>) -> Duration {
    let len = ctx.len();
    ctx.fade_out();

    let step = ctx.runtime.counter_mode_step;
    let mut slots = [step & 0xFFFF, step >> 16, u32::from(ctx.runtime.aux_param3)];
    for (index, slot) in slots.iter_mut().enumerate() {
        if *slot == 0 && ctx.random16_below(len) == 0 {
            *slot = 1;
        }
        if *slot == 0 {
            continue;
        }

        let color = color_or_primary(ctx, index);
        ctx.set_directed((*slot - 1) as u16, color);
        *slot += 1;
        if *slot > u32::from(len) {
            *slot = 0;
            ctx.set_cycle();
        }
    }

    ctx.runtime.counter_mode_step = slots[0] | (slots[1] << 16);
    ctx.runtime.aux_param3 = slots[2] as u16;
    ctx.speed_div(u32::from(len))
}

/// Three colored bars swinging across the segment at different rates
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn oscillate(ctx: &mut EffectContext<'_>) -> Duration {
    let len = u32::from(ctx.len());
    let span = len - 1;
    let width = ctx.size() * 2;
    let step = ctx.runtime.counter_mode_step;
    ctx.fill(BLACK);

    for index in 0..3u32 {
        let position = if span == 0 {
            0
        } else {
            let t = step.wrapping_mul(index + 1).wrapping_add(index * span * 2 / 3) % (span * 2);
            if t < span { t } else { span * 2 - t }
        };
        let color = color_or_primary(ctx, index as usize);
        let first = (u32::from(ctx.start()) + position).saturating_sub(u32::from(width / 2));
        ctx.fill_range(first as u16, width, color);
    }

    ctx.runtime.counter_mode_step = step.wrapping_add(1);
    if span == 0 || ctx.runtime.counter_mode_step % (span * 2) == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(len)
}
