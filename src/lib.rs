//! # Photoprep
//!
//! A single-shot photo pipeline for the album backend. The web server invokes
//! the binary once per uploaded image; the binary extracts EXIF metadata,
//! rotates the pixels upright, applies a mood filter, saves the result, and
//! answers with one JSON line on stdout. There is no state between
//! invocations — every run starts from the raw bytes and ends at the saved
//! file.
//!
//! # Architecture: One Pass, Six Stages
//!
//! ```text
//! Loading → MetadataExtracted → Normalized → StyleResolved → Filtered → Saved
//! ```
//!
//! Each stage is a pure function over the decoded buffer (or over the tag
//! set), so unit tests can exercise any stage without touching the
//! filesystem. Only the driver at the ends — reading the source, writing the
//! output — does I/O.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`exif`] | Tag-set reading plus datetime/GPS/orientation extraction — total, never aborts the pipeline |
//! | [`orient`] | Applies the rotation implied by the EXIF `Orientation` tag |
//! | [`style`] | Style label parsing with silent `vivid` fallback; the classifier trait boundary |
//! | [`filters`] | The three pixel transforms: enhance, sad-tone, pencil-sketch |
//! | [`naming`] | Capture-time-based output filename derivation |
//! | [`pipeline`] | Sequences the stages, owns the error taxonomy, saves the result |
//! | [`effects`] | Scenery → sound and emotion → stamp asset mapping |
//! | [`record`] | JSON records handed back to the calling process |
//! | [`config`] | `config.toml` loading, validation, stock config generation |
//!
//! # Design Decisions
//!
//! ## Channels, Not Exceptions
//!
//! The calling process reads stdout for exactly one JSON record and stderr
//! for diagnostics. Anything that can degrade gracefully does — a missing
//! EXIF block, a malformed timestamp, an unrecognized style label all log a
//! warning and continue. Only two conditions abort: an unreadable source
//! (exit code 2) and a failure after decoding succeeded (exit code 1).
//!
//! ## Metadata Is Optional, Field By Field
//!
//! `date_time` and `location` are extracted independently and serialized as
//! absent keys when missing. A photo with GPS but no timestamp (or the
//! reverse) is a normal input, not an edge case.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, rotation, and all three filters run on the `image` /
//! `imageproc` ecosystem — no OpenCV, no ImageMagick, no system libraries.
//! The binary is fully self-contained, which matters because the backend
//! spawns it on whatever host the server happens to run on.

pub mod config;
pub mod effects;
pub mod exif;
pub mod filters;
pub mod naming;
pub mod orient;
pub mod pipeline;
pub mod record;
pub mod style;

#[cfg(test)]
pub(crate) mod test_helpers;
