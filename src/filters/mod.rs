//! The three cosmetic filters.
//!
//! | Style | Module | Transform |
//! |---|---|---|
//! | `vivid` | [`enhance`] | CLAHE contrast + saturation boost + unsharp mask |
//! | `sad` | [`sadtone`] | desaturate, darken, shift toward blue |
//! | `sketch` | [`sketch`] | bilateral smoothing + dodge-based pencil strokes |
//!
//! All three are total functions over an RGB buffer: they never fail on
//! valid pixel data, and every arithmetic step funnels through
//! [`clamp_channel`] so overflow saturates instead of wrapping. Intensity
//! parameters are clamped into `[0, 1]` on entry.

pub mod enhance;
pub mod sadtone;
pub mod sketch;

use image::RgbImage;

use crate::config::ProcessConfig;
use crate::style::Style;

/// Dispatch the selected style to its transform.
pub fn apply(style: Style, img: &RgbImage, config: &ProcessConfig) -> RgbImage {
    match style {
        Style::Vivid => enhance::enhance(img, &enhance::EnhanceParams::from_config(config)),
        Style::Sad => sadtone::sad_tone(img, config.mood()),
        Style::Sketch => sketch::pencil_sketch(img, config.mood()),
    }
}

/// Clamp a channel value into the valid 8-bit range.
///
/// Every per-channel arithmetic result in this module tree goes through
/// here, so no filter can wrap around regardless of intermediate values.
pub(crate) fn clamp_channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// BT.601 luma from 8-bit RGB.
pub(crate) fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// RGB (8-bit) to HSV: hue in degrees `[0, 360)`, saturation and value in
/// `[0, 1]`.
pub(crate) fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

/// HSV back to 8-bit RGB. Inverse of [`rgb_to_hsv`] up to rounding.
pub(crate) fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let h_prime = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    (
        clamp_channel((r1 + m) * 255.0),
        clamp_channel((g1 + m) * 255.0),
        clamp_channel((b1 + m) * 255.0),
    )
}
