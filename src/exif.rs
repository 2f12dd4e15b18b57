//! EXIF tag extraction.
//!
//! Reading metadata must never abort the pipeline: a photo without an EXIF
//! segment, with a malformed timestamp, or with a half-written GPS block is
//! a normal input. Every function here returns an `Option` and logs the
//! reason for absence — no error type, no panic, no exception tunneling
//! (the backend only ever sees absent JSON keys).
//!
//! ## Tag sources
//!
//! - `DateTimeOriginal` (Exif IFD) — capture time, format `YYYY:MM:DD HH:MM:SS`.
//! - `GPSLatitude`/`GPSLongitude` + their `Ref` tags (GPS IFD) — DMS
//!   rationals converted to decimal degrees. All four must be present;
//!   a coordinate without its hemisphere reference is meaningless and is
//!   dropped rather than guessed.
//! - `Orientation` (IFD0) — consumed by [`crate::orient`].

use chrono::NaiveDateTime;
// Leading `::` disambiguates the kamadak-exif crate from this module.
use ::exif::{Exif, In, Reader, Tag, Value};
use log::{debug, warn};

use crate::record::Location;

/// Timestamp layout used by `DateTimeOriginal`.
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Read the EXIF tag set embedded in an encoded image.
///
/// `None` covers every failure mode — no APP1 segment, truncated TIFF
/// structure, unsupported container. All of them mean "no metadata", not
/// "broken pipeline".
pub fn read_tags(bytes: &[u8]) -> Option<Exif> {
    match Reader::new().read_from_container(&mut std::io::Cursor::new(bytes)) {
        Ok(tags) => Some(tags),
        Err(e) => {
            debug!("no EXIF tag set: {e}");
            None
        }
    }
}

/// Extract the capture time from `DateTimeOriginal`.
///
/// Returns `None` for a missing tag or a timestamp that does not match the
/// EXIF layout exactly — a malformed value is logged and skipped, never
/// propagated.
pub fn get_datetime(tags: &Exif) -> Option<NaiveDateTime> {
    let field = tags.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;
    let raw = match field.value {
        Value::Ascii(ref lines) if !lines.is_empty() => {
            String::from_utf8_lossy(&lines[0]).trim().to_string()
        }
        _ => {
            debug!("DateTimeOriginal present but not ASCII");
            return None;
        }
    };
    match NaiveDateTime::parse_from_str(&raw, EXIF_DATETIME_FORMAT) {
        Ok(dt) => Some(dt),
        Err(e) => {
            warn!("unparsable DateTimeOriginal {raw:?}: {e}");
            None
        }
    }
}

/// Extract the capture position from the GPS tag block.
///
/// Requires all four of latitude, longitude, and both hemisphere
/// references. Any missing piece yields `None` with the specific cause
/// logged; the pipeline continues without a location.
pub fn get_gps(tags: &Exif) -> Option<Location> {
    let lat = match tags.get_field(Tag::GPSLatitude, In::PRIMARY) {
        Some(field) => dms_to_decimal(&field.value)?,
        None => {
            debug!("no GPS latitude tag");
            return None;
        }
    };
    let lon = match tags.get_field(Tag::GPSLongitude, In::PRIMARY) {
        Some(field) => dms_to_decimal(&field.value)?,
        None => {
            debug!("no GPS longitude tag");
            return None;
        }
    };
    let Some(lat_ref) = ref_letter(tags, Tag::GPSLatitudeRef) else {
        warn!("GPS latitude present but latitude reference missing, dropping location");
        return None;
    };
    let Some(lon_ref) = ref_letter(tags, Tag::GPSLongitudeRef) else {
        warn!("GPS longitude present but longitude reference missing, dropping location");
        return None;
    };

    // Anything other than the positive pole negates the magnitude.
    let latitude = if lat_ref.eq_ignore_ascii_case("N") {
        lat
    } else {
        -lat
    };
    let longitude = if lon_ref.eq_ignore_ascii_case("E") {
        lon
    } else {
        -lon
    };
    Some(Location {
        latitude,
        longitude,
    })
}

/// Raw `Orientation` tag value, if present and in the defined 1..=8 range.
pub fn get_orientation(tags: &Exif) -> Option<u32> {
    let field = tags.get_field(Tag::Orientation, In::PRIMARY)?;
    match field.value.get_uint(0) {
        Some(v @ 1..=8) => Some(v),
        other => {
            debug!("orientation tag out of range: {other:?}");
            None
        }
    }
}

/// Convert a degree/minute/second rational triple to decimal degrees.
///
/// Returns the unsigned magnitude; the caller applies the hemisphere sign.
/// Zero denominators (seen in the wild from buggy firmware) yield `None`.
fn dms_to_decimal(value: &Value) -> Option<f64> {
    let Value::Rational(rationals) = value else {
        debug!("GPS coordinate is not a rational triple");
        return None;
    };
    if rationals.len() < 3 {
        debug!("GPS coordinate has {} components, need 3", rationals.len());
        return None;
    }
    if rationals.iter().take(3).any(|r| r.denom == 0) {
        warn!("GPS coordinate with zero denominator, dropping");
        return None;
    }
    let degrees = rationals[0].to_f64();
    let minutes = rationals[1].to_f64();
    let seconds = rationals[2].to_f64();
    Some(degrees + minutes / 60.0 + seconds / 3600.0)
}

/// First character of an ASCII hemisphere reference tag.
fn ref_letter(tags: &Exif, tag: Tag) -> Option<String> {
    let field = tags.get_field(tag, In::PRIMARY)?;
    match field.value {
        Value::Ascii(ref lines) if !lines.is_empty() && !lines[0].is_empty() => {
            Some(String::from_utf8_lossy(&lines[0]).trim().to_string())
        }
        _ => None,
    }
}
