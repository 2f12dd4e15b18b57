//! The `vivid` filter: local contrast, saturation, sharpness.
//!
//! Three stages, each optional at its identity setting:
//!
//! 1. **CLAHE** on the luma channel — histogram equalization per tile
//!    (8×8 grid) with the histogram clipped at `clip_limit` × the uniform
//!    bin height, excess redistributed, and per-pixel mappings blended
//!    bilinearly between neighboring tiles. Chroma is untouched.
//! 2. **Saturation** — HSV saturation multiplied by a configurable scale
//!    (default 1.2), clamped to 1.
//! 3. **Unsharp mask** — `sharp = original * (1 + amount) − blur * amount`
//!    against a Gaussian blur (σ ≈ 1.0), per channel, clamped.

use image::{Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;

use super::{clamp_channel, hsv_to_rgb, rgb_to_hsv};
use crate::config::ProcessConfig;

/// Tuning knobs for the vivid transform.
#[derive(Debug, Clone, PartialEq)]
pub struct EnhanceParams {
    /// HSV saturation multiplier. 1.0 leaves saturation untouched.
    pub saturation_scale: f32,
    /// Unsharp mask strength. 0.0 skips sharpening entirely.
    pub sharp_amount: f32,
    /// Gaussian sigma for the unsharp blur.
    pub sharp_sigma: f32,
    /// CLAHE histogram clip, as a multiple of the uniform bin height.
    pub clip_limit: f32,
    /// CLAHE tile grid dimension (grid × grid tiles).
    pub tile_grid: u32,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            saturation_scale: 1.2,
            sharp_amount: 0.3,
            sharp_sigma: 1.0,
            clip_limit: 2.0,
            tile_grid: 8,
        }
    }
}

impl EnhanceParams {
    pub fn from_config(config: &ProcessConfig) -> Self {
        Self {
            saturation_scale: config.filter.saturation_scale,
            sharp_amount: config.filter.sharp_amount,
            ..Self::default()
        }
    }
}

/// Apply the full vivid transform.
pub fn enhance(img: &RgbImage, params: &EnhanceParams) -> RgbImage {
    let mut out = equalize_luma(img, params.clip_limit, params.tile_grid);

    if params.saturation_scale != 1.0 {
        scale_saturation(&mut out, params.saturation_scale);
    }

    if params.sharp_amount > 0.0 {
        out = unsharp_mask(&out, params.sharp_sigma.max(0.1), params.sharp_amount);
    }

    out
}

/// CLAHE on the luma channel of a YCbCr decomposition; chroma passes
/// through unchanged.
fn equalize_luma(img: &RgbImage, clip_limit: f32, grid: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    let pixels = (w * h) as usize;

    let mut luma = vec![0u8; pixels];
    let mut cb = vec![0f32; pixels];
    let mut cr = vec![0f32; pixels];
    for (i, Rgb([r, g, b])) in img.pixels().enumerate() {
        let (r, g, b) = (*r as f32, *g as f32, *b as f32);
        luma[i] = clamp_channel(0.299 * r + 0.587 * g + 0.114 * b);
        cb[i] = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
        cr[i] = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
    }

    let equalized = clahe(&luma, w as usize, h as usize, clip_limit, grid as usize);

    let mut out = RgbImage::new(w, h);
    for (i, pixel) in out.pixels_mut().enumerate() {
        let y = equalized[i] as f32;
        let cb = cb[i] - 128.0;
        let cr = cr[i] - 128.0;
        *pixel = Rgb([
            clamp_channel(y + 1.402 * cr),
            clamp_channel(y - 0.344136 * cb - 0.714136 * cr),
            clamp_channel(y + 1.772 * cb),
        ]);
    }
    out
}

/// Contrast-limited adaptive histogram equalization over one 8-bit plane.
fn clahe(plane: &[u8], w: usize, h: usize, clip_limit: f32, grid: usize) -> Vec<u8> {
    let tile_w = w.div_ceil(grid.max(1)).max(1);
    let tile_h = h.div_ceil(grid.max(1)).max(1);
    let tiles_x = w.div_ceil(tile_w);
    let tiles_y = h.div_ceil(tile_h);

    // Per-tile clipped-histogram mapping.
    let mut luts: Vec<[u8; 256]> = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = (x0 + tile_w).min(w);
            let y1 = (y0 + tile_h).min(h);

            let mut hist = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[plane[y * w + x] as usize] += 1;
                }
            }
            let count = ((x1 - x0) * (y1 - y0)) as u32;

            // Clip, then redistribute the excess so the histogram keeps its
            // total mass: an even share per bin plus the remainder stepped
            // across the range. A flat tile thus maps close to identity
            // instead of collapsing onto one bin.
            let clip = ((clip_limit * count as f32 / 256.0) as u32).max(1);
            let mut excess = 0u32;
            for bin in hist.iter_mut() {
                if *bin > clip {
                    excess += *bin - clip;
                    *bin = clip;
                }
            }
            let bonus = excess / 256;
            let mut residual = (excess % 256) as usize;
            if bonus > 0 {
                for bin in hist.iter_mut() {
                    *bin += bonus;
                }
            }
            if residual > 0 {
                let step = (256 / residual).max(1);
                let mut i = 0;
                while residual > 0 && i < 256 {
                    hist[i] += 1;
                    residual -= 1;
                    i += step;
                }
            }

            let mut lut = [0u8; 256];
            let scale = 255.0 / count.max(1) as f32;
            let mut cum = 0u32;
            for (v, bin) in hist.iter().enumerate() {
                cum += bin;
                lut[v] = clamp_channel(cum as f32 * scale);
            }
            luts.push(lut);
        }
    }

    // Blend the four surrounding tile mappings per pixel.
    let mut out = vec![0u8; plane.len()];
    for y in 0..h {
        let gy = (y as f32 + 0.5) / tile_h as f32 - 0.5;
        let fy = gy - gy.floor();
        // Clamp both neighbors from the unclamped cell, so pixels outside
        // the outermost tile centers collapse onto a single tile instead of
        // borrowing weight from the next one.
        let ty0 = (gy.floor() as isize).clamp(0, tiles_y as isize - 1) as usize;
        let ty1 = ((gy.floor() as isize + 1).clamp(0, tiles_y as isize - 1)) as usize;
        for x in 0..w {
            let gx = (x as f32 + 0.5) / tile_w as f32 - 0.5;
            let fx = gx - gx.floor();
            let tx0 = (gx.floor() as isize).clamp(0, tiles_x as isize - 1) as usize;
            let tx1 = ((gx.floor() as isize + 1).clamp(0, tiles_x as isize - 1)) as usize;

            let v = plane[y * w + x] as usize;
            let v00 = luts[ty0 * tiles_x + tx0][v] as f32;
            let v01 = luts[ty0 * tiles_x + tx1][v] as f32;
            let v10 = luts[ty1 * tiles_x + tx0][v] as f32;
            let v11 = luts[ty1 * tiles_x + tx1][v] as f32;

            let top = v00 * (1.0 - fx) + v01 * fx;
            let bottom = v10 * (1.0 - fx) + v11 * fx;
            out[y * w + x] = clamp_channel(top * (1.0 - fy) + bottom * fy);
        }
    }
    out
}

/// Multiply HSV saturation in place, clamped to 1.
fn scale_saturation(img: &mut RgbImage, scale: f32) {
    for pixel in img.pixels_mut() {
        let Rgb([r, g, b]) = *pixel;
        let (h, s, v) = rgb_to_hsv(r, g, b);
        let (r, g, b) = hsv_to_rgb(h, (s * scale).min(1.0), v);
        *pixel = Rgb([r, g, b]);
    }
}

/// `sharp = original * (1 + amount) − blur * amount`, per channel.
fn unsharp_mask(img: &RgbImage, sigma: f32, amount: f32) -> RgbImage {
    let blurred = gaussian_blur_f32(img, sigma);
    let mut out = RgbImage::new(img.width(), img.height());
    for ((pixel, sharp), soft) in img.pixels().zip(out.pixels_mut()).zip(blurred.pixels()) {
        for c in 0..3 {
            let original = pixel[c] as f32;
            let blur = soft[c] as f32;
            sharp[c] = clamp_channel(original * (1.0 + amount) - blur * amount);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_params() -> EnhanceParams {
        EnhanceParams {
            saturation_scale: 1.0,
            sharp_amount: 0.0,
            ..EnhanceParams::default()
        }
    }

    #[test]
    fn uniform_image_is_stable_on_identity_path() {
        // With saturation and sharpening at identity, only CLAHE runs, and
        // a clipped histogram over a flat image maps each value near itself.
        let img = RgbImage::from_pixel(256, 256, Rgb([120, 120, 120]));
        let out = enhance(&img, &identity_params());
        for pixel in out.pixels() {
            for c in 0..3 {
                assert!(
                    (pixel[c] as i16 - 120).abs() <= 6,
                    "channel drifted to {}",
                    pixel[c]
                );
            }
        }
    }

    #[test]
    fn saturation_stage_is_identity_at_scale_one() {
        let mut img = RgbImage::from_fn(16, 16, |x, y| {
            Rgb([(x * 16) as u8, (y * 16) as u8, 200])
        });
        let reference = img.clone();
        scale_saturation(&mut img, 1.0);
        // Scale 1.0 still round-trips through HSV; allow rounding wobble.
        for (a, b) in img.pixels().zip(reference.pixels()) {
            for c in 0..3 {
                assert!((a[c] as i16 - b[c] as i16).abs() <= 1);
            }
        }
    }

    #[test]
    fn saturation_scale_above_one_increases_mean_saturation() {
        let img = RgbImage::from_fn(32, 32, |x, _| Rgb([200, (80 + x) as u8, 60]));
        let mean_sat = |img: &RgbImage| {
            img.pixels()
                .map(|p| rgb_to_hsv(p[0], p[1], p[2]).1)
                .sum::<f32>()
                / (img.width() * img.height()) as f32
        };
        let mut boosted = img.clone();
        scale_saturation(&mut boosted, 1.2);
        assert!(mean_sat(&boosted) > mean_sat(&img));
    }

    #[test]
    fn clahe_stretches_low_contrast_gradient() {
        // A gradient squeezed into [100, 140] should spread out.
        let w = 64usize;
        let h = 64usize;
        let plane: Vec<u8> = (0..w * h)
            .map(|i| 100 + ((i % w) * 40 / w) as u8)
            .collect();
        let out = clahe(&plane, w, h, 2.0, 8);

        let spread = |p: &[u8]| {
            let mean = p.iter().map(|&v| v as f64).sum::<f64>() / p.len() as f64;
            (p.iter()
                .map(|&v| (v as f64 - mean).powi(2))
                .sum::<f64>()
                / p.len() as f64)
                .sqrt()
        };
        assert!(spread(&out) > spread(&plane));
    }

    #[test]
    fn unsharp_amount_zero_path_is_skipped() {
        let img = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 50]));
        let params = EnhanceParams {
            saturation_scale: 1.0,
            sharp_amount: 0.0,
            ..EnhanceParams::default()
        };
        // Output must match the CLAHE-only path exactly.
        let expected = equalize_luma(&img, params.clip_limit, params.tile_grid);
        assert_eq!(enhance(&img, &params), expected);
    }

    #[test]
    fn full_transform_is_total_on_extremes() {
        for value in [Rgb([0, 0, 0]), Rgb([255, 255, 255]), Rgb([255, 0, 255])] {
            let img = RgbImage::from_pixel(24, 24, value);
            let out = enhance(&img, &EnhanceParams::default());
            assert_eq!((out.width(), out.height()), (24, 24));
        }
    }

    #[test]
    fn tiny_images_do_not_panic() {
        let img = RgbImage::from_pixel(3, 2, Rgb([10, 200, 30]));
        let out = enhance(&img, &EnhanceParams::default());
        assert_eq!((out.width(), out.height()), (3, 2));
    }
}
