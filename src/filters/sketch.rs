//! The `sketch` filter: pencil-drawing stylization.
//!
//! Mood drives the three classic pencil-sketch parameters:
//!
//! ```text
//! sigma_s = 30 + 70 · mood     spatial scale of the smoothing
//! sigma_r = 0.05 + 0.15 · mood range scale (edge tolerance)
//! shade   = 0.03 + 0.07 · mood how much tonal shading survives
//! ```
//!
//! Pipeline: luma → bilateral smoothing (spatial sigma from `sigma_s`,
//! range sigma from `sigma_r`) → color-dodge stroke extraction against a
//! blurred negative → blend `shade` of the smoothed tone back in → promote
//! to three channels. The dodge denominator is floored at 1 so the filter
//! is total even on pure white input.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;

use super::{clamp_channel, luma};

/// Bilateral window radius ceiling. The window cost is quadratic in the
/// radius, and beyond this the visual difference is negligible.
const MAX_RADIUS: i64 = 6;

/// Apply the pencil-sketch transform at the given mood intensity.
pub fn pencil_sketch(img: &RgbImage, mood: f32) -> RgbImage {
    let mood = mood.clamp(0.0, 1.0);
    let sigma_s = 30.0 + 70.0 * mood;
    let sigma_r = 0.05 + 0.15 * mood;
    let shade = 0.03 + 0.07 * mood;

    let gray = GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let Rgb([r, g, b]) = *img.get_pixel(x, y);
        Luma([clamp_channel(luma(r, g, b))])
    });

    // sigma_s is specified on a 0-100 style scale; one tenth of it is the
    // pixel-space sigma.
    let spatial_sigma = (sigma_s / 10.0).max(0.5);
    let smoothed = bilateral(&gray, spatial_sigma, sigma_r * 255.0);

    // Color-dodge against the blurred negative: flat regions divide to
    // white, edges survive as dark strokes.
    let inverted = GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([255 - smoothed.get_pixel(x, y)[0]])
    });
    let blurred_negative = gaussian_blur_f32(&inverted, spatial_sigma);

    let mut out = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let base = smoothed.get_pixel(x, y)[0] as f32;
        let denominator = (255.0 - blurred_negative.get_pixel(x, y)[0] as f32).max(1.0);
        let stroke = (base * 255.0 / denominator).min(255.0);
        let value = clamp_channel(stroke * (1.0 - shade) + base * shade);
        *pixel = Rgb([value, value, value]);
    }
    out
}

/// Brute-force bilateral filter over one gray plane.
///
/// The window radius follows the spatial sigma but is capped at
/// [`MAX_RADIUS`]; the range kernel works on 8-bit intensity distance.
fn bilateral(plane: &GrayImage, spatial_sigma: f32, range_sigma: f32) -> GrayImage {
    let (w, h) = plane.dimensions();
    let radius = ((2.0 * spatial_sigma).ceil() as i64).clamp(1, MAX_RADIUS);
    let range_sigma = range_sigma.max(1.0);

    let inv_2ss = 1.0 / (2.0 * spatial_sigma * spatial_sigma);
    let inv_2rs = 1.0 / (2.0 * range_sigma * range_sigma);

    // Spatial weights are shift-invariant; precompute the window.
    let mut spatial = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            spatial.push((-((dx * dx + dy * dy) as f32) * inv_2ss).exp());
        }
    }

    GrayImage::from_fn(w, h, |x, y| {
        let center = plane.get_pixel(x, y)[0] as f32;
        let mut weight_sum = 0.0f32;
        let mut value_sum = 0.0f32;
        let mut i = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let sw = spatial[i];
                i += 1;
                let nx = (x as i64 + dx).clamp(0, w as i64 - 1) as u32;
                let ny = (y as i64 + dy).clamp(0, h as i64 - 1) as u32;
                let neighbor = plane.get_pixel(nx, ny)[0] as f32;
                let diff = neighbor - center;
                let weight = sw * (-diff * diff * inv_2rs).exp();
                weight_sum += weight;
                value_sum += weight * neighbor;
            }
        }
        Luma([clamp_channel(value_sum / weight_sum)])
    })
}
