//! The `sad` filter: muted, darkened, cool.
//!
//! All three adjustments scale linearly with `mood ∈ [0, 1]`:
//!
//! ```text
//! saturation scale  = 1 − 0.35 · mood
//! brightness scale  = 1 − 0.08 · mood
//! cool strength     = 0.12 · mood
//! ```
//!
//! Saturation and brightness are scaled in HSV; the cool shift then raises
//! the blue channel by `1 + cool` and lowers red by `1 − cool` in RGB.
//! At `mood = 0` every factor is 1 and the input is returned unchanged.

use image::{Rgb, RgbImage};

use super::{clamp_channel, hsv_to_rgb, rgb_to_hsv};

/// Apply the sad-tone transform at the given mood intensity.
pub fn sad_tone(img: &RgbImage, mood: f32) -> RgbImage {
    let mood = mood.clamp(0.0, 1.0);
    if mood == 0.0 {
        return img.clone();
    }

    let saturation_scale = 1.0 - 0.35 * mood;
    let brightness_scale = 1.0 - 0.08 * mood;
    let cool = 0.12 * mood;

    let mut out = RgbImage::new(img.width(), img.height());
    for (src, dst) in img.pixels().zip(out.pixels_mut()) {
        let Rgb([r, g, b]) = *src;
        let (h, s, v) = rgb_to_hsv(r, g, b);
        let (r, g, b) = hsv_to_rgb(
            h,
            (s * saturation_scale).min(1.0),
            (v * brightness_scale).min(1.0),
        );
        *dst = Rgb([
            clamp_channel(r as f32 * (1.0 - cool)),
            g,
            clamp_channel(b as f32 * (1.0 + cool)),
        ]);
    }
    out
}
