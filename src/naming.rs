//! Output filename derivation.
//!
//! The backend stores every processed photo under one directory, so names
//! must not collide across uploads. The caller-supplied result identifier
//! carries the uniqueness; the capture timestamp makes the name sortable
//! and human-scannable. Photos without a capture time get the processing
//! time instead, marked `unknown_` so the two sources are distinguishable.
//!
//! ```text
//! abc123-240501102030.jpg            capture time known
//! abc123-unknown_260806141503.jpg    capture time absent
//! ```

use chrono::{Local, NaiveDateTime};
use std::path::Path;

/// Compact timestamp used in filenames: `yyMMddHHmmss`.
const STAMP_FORMAT: &str = "%y%m%d%H%M%S";

/// Derive the output filename.
///
/// `{result_id}-{stamp}{ext}` where the extension (dot included, case
/// preserved) comes from the original upload name. Collision resistance
/// rests on `result_id` being unique per upload — two photos taken in the
/// same second still get distinct names.
pub fn output_filename(
    result_id: &str,
    capture: Option<NaiveDateTime>,
    original_name: &str,
) -> String {
    let stamp = match capture {
        Some(dt) => dt.format(STAMP_FORMAT).to_string(),
        None => format!("unknown_{}", Local::now().format(STAMP_FORMAT)),
    };
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{result_id}-{stamp}{ext}")
}
