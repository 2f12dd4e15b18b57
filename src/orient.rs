//! Orientation normalization.
//!
//! Cameras store portrait shots as landscape pixels plus an `Orientation`
//! tag describing how the sensor was held. The filters downstream work on
//! physical pixels, so the tag's intent is applied here once — the buffer
//! is rotated upright and the tag is simply not carried into the output.
//!
//! Only the three rotation values are handled. The mirrored orientations
//! (2, 4, 5, 7) do not occur in phone camera output and pass through
//! unchanged, as does an absent or out-of-range tag.

use ::exif::Exif;
use image::RgbImage;
use image::imageops;
use log::debug;

use crate::exif::get_orientation;

/// Rotate the buffer per the EXIF `Orientation` tag.
///
/// Tag value 3 is upside-down and rotates 180°; the two sideways holds
/// map to clockwise turns of 270° for value 6 (camera rotated left) and
/// 90° for value 8. Every other value, and a missing tag set, passes the
/// buffer through unchanged.
pub fn normalize(img: RgbImage, tags: Option<&Exif>) -> RgbImage {
    let orientation = tags.and_then(get_orientation);
    match orientation {
        Some(3) => imageops::rotate180(&img),
        Some(6) => imageops::rotate270(&img),
        Some(8) => imageops::rotate90(&img),
        Some(other) => {
            debug!("orientation {other} needs no rotation, passing through");
            img
        }
        None => img,
    }
}
