//! Fireworks and flickering fire

use embassy_time::Duration;

use super::EffectContext;
use crate::color::{color_wheel, rgbw, split};

const FIREWORKS_IDLE_DENSITY: u16 = 20;
const FIREWORKS_TRIGGERED_DENSITY: u16 = 10;

/// Per-channel saturating sum of two packed colors
fn add_colors(a: u32, b: u32) -> u32 {
    let (aw, ar, ag, ab) = split(a);
    let (bw, br, bg, bb) = split(b);
    rgbw(
        ar.saturating_add(br),
        ag.saturating_add(bg),
        ab.saturating_add(bb),
        aw.saturating_add(bw),
    )
}

/// Spread every lit pixel into its neighbours
fn blur(ctx: &mut EffectContext<'_>) {
    for index in ctx.start() + 1..ctx.stop() {
        let prev = (ctx.pixel(index - 1) >> 2) & 0x3F3F_3F3F;
        let current = ctx.pixel(index);
        let next = (ctx.pixel(index + 1) >> 2) & 0x3F3F_3F3F;
        ctx.put_pixel(index, add_colors(add_colors(prev, current), next));
    }
}

/// Random bursts that bloom and fade; a trigger fires a full volley
fn fireworks(ctx: &mut EffectContext<'_>, color: u32) -> Duration {
    ctx.fade_out();
    blur(ctx);

    let size = ctx.size();
    let len = ctx.len();
    if ctx.triggered() {
        for _ in 0..(len / FIREWORKS_TRIGGERED_DENSITY).max(1) {
            let first = ctx.random_element_start();
            ctx.fill_range(first, size, color);
            ctx.set_cycle();
        }
    } else {
        for _ in 0..(len / FIREWORKS_IDLE_DENSITY).max(1) {
            if ctx.random8_below(10) == 0 {
                let first = ctx.random_element_start();
                ctx.fill_range(first, size, color);
                ctx.set_cycle();
            }
        }
    }
    ctx.speed_div(u32::from(len))
}

pub(crate) fn fireworks_color(ctx: &mut EffectContext<'_>) -> Duration {
    let color = ctx.color(0);
    fireworks(ctx, color)
}

pub(crate) fn fireworks_random(ctx: &mut EffectContext<'_>) -> Duration {
    let color = color_wheel(ctx.random8());
    fireworks(ctx, color)
}

/// Larger bursts whose hue keeps walking around the wheel
pub(crate) fn rainbow_fireworks(ctx: &mut EffectContext<'_>) -> Duration {
    ctx.fade_out();
    blur(ctx);

    if ctx.triggered() || ctx.random8_below(10) == 0 {
        ctx.runtime.aux_param = ctx.random_wheel_index(ctx.runtime.aux_param);
        let color = color_wheel(ctx.runtime.aux_param);
        let first = ctx.random_element_start();
        ctx.fill_range(first, ctx.size() * 2, color);
        ctx.set_cycle();
    }
    ctx.speed_div(u32::from(ctx.len()))
}

/// Every pixel dims by a random amount; lower `damping` flickers harder
fn fire_flicker(ctx: &mut EffectContext<'_>, damping: u8) -> Duration {
    let (w, r, g, b) = split(ctx.color(0));
    let lum = w.max(r).max(g).max(b) / damping;

    for index in ctx.start()..=ctx.stop() {
        let flicker = ctx.random8_below(lum);
        let color = rgbw(
            r.saturating_sub(flicker),
            g.saturating_sub(flicker),
            b.saturating_sub(flicker),
            w.saturating_sub(flicker),
        );
        ctx.set_pixel(index, color);
    }
    ctx.set_cycle();
    ctx.speed_div(u32::from(ctx.len()))
}

pub(crate) fn fire_flicker_normal(ctx: &mut EffectContext<'_>) -> Duration {
    fire_flicker(ctx, 3)
}

pub(crate) fn fire_flicker_soft(ctx: &mut EffectContext<'_>) -> Duration {
    fire_flicker(ctx, 6)
}

pub(crate) fn fire_flicker_intense(ctx: &mut EffectContext<'_>) -> Duration {
    fire_flicker(ctx, 1)
}
