//! JSON records handed back to the calling process.
//!
//! These types are the stdout contract: the backend parses exactly one line
//! of JSON per invocation. Optional fields are serialized as absent keys,
//! never as null — the backend treats key presence as the signal.

use serde::{Deserialize, Serialize};

use crate::style::Style;

/// GPS position in decimal degrees, southern/western hemispheres negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Result record for a processed photo.
///
/// `date_time` and `location` are independently optional: either can be
/// absent without implying anything about the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Capture time as ISO-8601 (`2024-05-01T10:20:30`), from `DateTimeOriginal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// Capture position, from the GPS tag block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// The filter that was applied. Always present — unknown labels resolve
    /// to `vivid` before the record is built.
    pub style: Style,
    /// Output path relative to the backend's public root.
    pub filepath: String,
}
