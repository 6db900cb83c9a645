//! Chases, theater chases and running patterns

use embassy_time::Duration;

use super::{EffectContext, scheme};
use crate::{
    color::{BLACK, BLUE, GREEN, ORANGE, PURPLE, RED, WHITE, color_blend, color_wheel, rgbw, split},
    gamma::gamma8,
    math8::sin8,
};

const FLASH_COUNT: u32 = 4;
const FLASH_DELAY: Duration = Duration::from_millis(30);

/// Three repeating bands of `size()` pixels each, shifting by one per call
#[allow(clippy::cast_possible_truncation)]
fn tricolor_chase(ctx: &mut EffectContext<'_>, c1: u32, c2: u32, c3: u32) -> Duration {
    let size = u32::from(ctx.size());
    let len = ctx.len();
    let step = ctx.runtime.counter_mode_step;

    for i in 0..len {
        let band = (step + u32::from(i)) % (size * 3);
        let color = if band < size {
            c1
        } else if band < size * 2 {
            c2
        } else {
            c3
        };
        // bands travel away from the stop end unless reversed
        let index = if ctx.is_reverse() {
            ctx.start() + i
        } else {
            ctx.stop() - i
        };
        ctx.set_pixel(index, color);
    }

    ctx.runtime.counter_mode_step = step.wrapping_add(1);
    if ctx.runtime.counter_mode_step % u32::from(len) == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(u32::from(len))
}

pub(crate) fn theater_chase(ctx: &mut EffectContext<'_>) -> Duration {
    let (c0, c1) = (ctx.color(0), ctx.color(1));
    tricolor_chase(ctx, c0, c1, c1)
}

pub(crate) fn theater_chase_rainbow(ctx: &mut EffectContext<'_>) -> Duration {
    ctx.runtime.aux_param = ctx.runtime.aux_param.wrapping_add(1);
    let color = color_wheel(ctx.runtime.aux_param);
    let background = ctx.color(1);
    tricolor_chase(ctx, color, background, background)
}

pub(crate) fn theater_chase_scheme<const S: u8>(ctx: &mut EffectContext<'_>) -> Duration {
    ctx.runtime.aux_param = ctx.runtime.aux_param.wrapping_add(1);
    let color = scheme::<S>().color(ctx.runtime.aux_param);
    let background = ctx.color(1);
    tricolor_chase(ctx, color, background, background)
}

pub(crate) fn tricolor(ctx: &mut EffectContext<'_>) -> Duration {
    let (c0, c1, c2) = (ctx.color(0), ctx.color(1), ctx.color(2));
    tricolor_chase(ctx, c0, c1, c2)
}

pub(crate) fn circus_combustus(ctx: &mut EffectContext<'_>) -> Duration {
    tricolor_chase(ctx, RED, WHITE, BLACK)
}

/// Three consecutive blocks of `size()` pixels walking along the segment
#[allow(clippy::cast_possible_truncation)]
fn chase(ctx: &mut EffectContext<'_>, c1: u32, c2: u32, c3: u32) -> Duration {
    let size = u32::from(ctx.size());
    let len = u32::from(ctx.len());
    let step = ctx.runtime.counter_mode_step;

    for i in 0..size {
        let a = (step + i) % len;
        let b = (a + size) % len;
        let c = (b + size) % len;
        ctx.set_directed(a as u16, c1);
        ctx.set_directed(b as u16, c2);
        ctx.set_directed(c as u16, c3);
    }

    if step + size * 3 == len {
        ctx.set_cycle();
    }
    ctx.runtime.counter_mode_step = (step + 1) % len;
    ctx.speed_div(len)
}

pub(crate) fn bicolor_chase(ctx: &mut EffectContext<'_>) -> Duration {
    let (c0, c1, c2) = (ctx.color(0), ctx.color(1), ctx.color(2));
    chase(ctx, c0, c1, c2)
}

pub(crate) fn chase_white(ctx: &mut EffectContext<'_>) -> Duration {
    let c0 = ctx.color(0);
    chase(ctx, c0, WHITE, WHITE)
}

pub(crate) fn chase_color(ctx: &mut EffectContext<'_>) -> Duration {
    let c0 = ctx.color(0);
    chase(ctx, WHITE, c0, c0)
}

pub(crate) fn chase_blackout(ctx: &mut EffectContext<'_>) -> Duration {
    let c0 = ctx.color(0);
    chase(ctx, c0, BLACK, BLACK)
}

pub(crate) fn chase_random(ctx: &mut EffectContext<'_>) -> Duration {
    if ctx.runtime.counter_mode_step == 0 {
        ctx.runtime.aux_param = ctx.random_wheel_index(ctx.runtime.aux_param);
    }
    let color = color_wheel(ctx.runtime.aux_param);
    chase(ctx, color, WHITE, WHITE)
}

/// Wheel position that moves with the chase and drifts every call
#[allow(clippy::cast_possible_truncation)]
fn chase_hue(ctx: &EffectContext<'_>, offset: u32) -> u8 {
    let separation = 256 / u32::from(ctx.len());
    let position = (ctx.runtime.counter_mode_step + offset) % u32::from(ctx.len());
    (position * separation + ctx.runtime.counter_mode_call) as u8
}

pub(crate) fn chase_rainbow(ctx: &mut EffectContext<'_>) -> Duration {
    let color = color_wheel(chase_hue(ctx, 0));
    chase(ctx, color, WHITE, WHITE)
}

pub(crate) fn chase_scheme<const S: u8>(ctx: &mut EffectContext<'_>) -> Duration {
    let color = scheme::<S>().color(chase_hue(ctx, 0));
    chase(ctx, color, WHITE, WHITE)
}

pub(crate) fn chase_rainbow_white(ctx: &mut EffectContext<'_>) -> Duration {
    let c2 = color_wheel(chase_hue(ctx, 0));
    let c3 = color_wheel(chase_hue(ctx, 1));
    chase(ctx, WHITE, c2, c3)
}

pub(crate) fn chase_blackout_rainbow(ctx: &mut EffectContext<'_>) -> Duration {
    let color = color_wheel(chase_hue(ctx, 0));
    chase(ctx, color, BLACK, BLACK)
}

/// Flash phase of the chase-flash modes, `None` once the flashes are done
fn flash_phase(ctx: &EffectContext<'_>) -> Option<u32> {
    let phase = ctx.runtime.counter_mode_call % (FLASH_COUNT * 2 + 1);
    (phase < FLASH_COUNT * 2).then_some(phase)
}

/// Move the flash point one pixel on; picks the next random color on wrap
#[allow(clippy::cast_possible_truncation)]
fn advance_flash(ctx: &mut EffectContext<'_>) -> Duration {
    let len = u32::from(ctx.len());
    ctx.runtime.counter_mode_step = (ctx.runtime.counter_mode_step + 1) % len;
    if ctx.runtime.counter_mode_step == 0 {
        ctx.runtime.aux_param = ctx.random_wheel_index(ctx.runtime.aux_param);
        ctx.set_cycle();
    }
    ctx.speed_div(len)
}

/// White flashes running over the segment color
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn chase_flash(ctx: &mut EffectContext<'_>) -> Duration {
    let len = u32::from(ctx.len());
    ctx.fill(ctx.color(0));

    let Some(phase) = flash_phase(ctx) else {
        return advance_flash(ctx);
    };
    let color = if phase % 2 == 0 { WHITE } else { ctx.color(0) };
    let n = ctx.runtime.counter_mode_step;
    let m = (n + 1) % len;
    ctx.set_directed(n as u16, color);
    ctx.set_directed(m as u16, color);
    FLASH_DELAY
}

/// White flashes leaving a trail of a random color behind them
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn chase_flash_random(ctx: &mut EffectContext<'_>) -> Duration {
    let len = u32::from(ctx.len());
    let color = color_wheel(ctx.runtime.aux_param);
    let n = ctx.runtime.counter_mode_step;
    for i in 0..n {
        ctx.set_directed(i as u16, color);
    }

    let Some(phase) = flash_phase(ctx) else {
        return advance_flash(ctx);
    };
    let m = (n + 1) % len;
    if phase % 2 == 0 {
        ctx.set_directed(n as u16, WHITE);
        ctx.set_directed(m as u16, WHITE);
    } else {
        ctx.set_directed(n as u16, color);
        ctx.set_directed(m as u16, BLACK);
    }
    FLASH_DELAY
}

/// Shift the segment by one pixel and feed a new pixel in at the head
fn shift_in(ctx: &mut EffectContext<'_>, color: u32) {
    let head = ctx.shift_forward();
    ctx.set_pixel(head, color);
}

/// Alternating blocks of two colors streaming along the segment
fn running(ctx: &mut EffectContext<'_>, c1: u32, c2: u32) -> Duration {
    let size = 2 * u32::from(ctx.size());
    let step = ctx.runtime.counter_mode_step;
    let color = if step & size != 0 { c1 } else { c2 };
    shift_in(ctx, color);

    ctx.runtime.counter_mode_step = (step + 1) % u32::from(ctx.len());
    if ctx.runtime.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(16)
}

pub(crate) fn running_color(ctx: &mut EffectContext<'_>) -> Duration {
    let (c0, c1) = (ctx.color(0), ctx.color(1));
    running(ctx, c0, c1)
}

pub(crate) fn running_red_blue(ctx: &mut EffectContext<'_>) -> Duration {
    running(ctx, RED, BLUE)
}

pub(crate) fn merry_christmas(ctx: &mut EffectContext<'_>) -> Duration {
    running(ctx, RED, GREEN)
}

pub(crate) fn halloween(ctx: &mut EffectContext<'_>) -> Duration {
    running(ctx, PURPLE, ORANGE)
}

pub(crate) fn running_random(ctx: &mut EffectContext<'_>) -> Duration {
    let size = 2 * u32::from(ctx.size());
    if ctx.runtime.counter_mode_step % size == 0 {
        ctx.runtime.aux_param = ctx.random_wheel_index(ctx.runtime.aux_param);
    }
    let color = color_wheel(ctx.runtime.aux_param);
    running(ctx, color, color)
}

/// Smooth sine-shaped waves of the first color over the second
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn running_lights(ctx: &mut EffectContext<'_>) -> Duration {
    let len = ctx.len();
    let size = u32::from(ctx.size());
    let increment = ((256 / u32::from(len)) * size).max(1);
    let step = ctx.runtime.counter_mode_step;
    let (c0, c1) = (ctx.color(0), ctx.color(1));

    for i in 0..len {
        let lum = sin8(((u32::from(i) + step) * increment) as u8);
        let color = color_blend(c0, c1, lum);
        // waves move away from the stop end unless reversed
        let index = if ctx.is_reverse() {
            ctx.start() + i
        } else {
            ctx.stop() - i
        };
        ctx.set_pixel(index, color);
    }

    ctx.runtime.counter_mode_step = (step + 1) % 256;
    if ctx.runtime.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(u32::from(len))
}

/// Diagonal stripes of the first two colors sliding along the segment
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn candy_cane(ctx: &mut EffectContext<'_>) -> Duration {
    let width = 2 * u32::from(ctx.size());
    let (c0, c1) = (ctx.color(0), ctx.color(1));
    let step = ctx.runtime.counter_mode_step;

    for i in 0..ctx.len() {
        let stripe = ((u32::from(i) + step) / width) % 2;
        ctx.set_directed(i, if stripe == 0 { c0 } else { c1 });
    }

    ctx.runtime.counter_mode_step = (step + 1) % (width * 2);
    if ctx.runtime.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(u32::from(ctx.len()))
}

/// Shift the segment along, feeding in a random mutation of the head color.
///
/// The head is read back already corrected, so only freshly drawn
/// channels go through gamma.
pub(crate) fn random_chase(ctx: &mut EffectContext<'_>) -> Duration {
    let head = if ctx.is_reverse() { ctx.stop() } else { ctx.start() };
    let (w, r, g, b) = split(ctx.pixel(head));
    let gamma = ctx.segment().options.gamma;

    let mut mutate = |channel: u8| {
        if ctx.random8_below(6) == 0 {
            let fresh = ctx.random8();
            if gamma { gamma8(fresh) } else { fresh }
        } else {
            channel
        }
    };
    let r = mutate(r);
    let g = mutate(g);
    let b = mutate(b);

    let head = ctx.shift_forward();
    ctx.put_pixel(head, rgbw(r, g, b, w));
    ctx.set_cycle();
    ctx.speed_div(1)
}
