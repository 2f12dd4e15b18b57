//! Pipeline driver.
//!
//! Sequences the stages over one image and owns the error taxonomy:
//!
//! ```text
//! Loading → MetadataExtracted → Normalized → StyleResolved → Filtered → Saved
//! ```
//!
//! Only two conditions are fatal. An unreadable or undecodable source
//! aborts before any processing ([`PipelineError::SourceNotFound`], exit
//! code 2); any failure after the source decoded is wrapped with the stage
//! it occurred in and the original cause ([`PipelineError::Processing`],
//! exit code 1). Everything else — missing EXIF, malformed tags,
//! unrecognized style labels — degrades to a documented default and the
//! pipeline continues.
//!
//! The output file is written in one `fs::write` call from a fully encoded
//! buffer, after every in-memory transform has succeeded. There is no
//! partially written output to clean up on failure.

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use log::debug;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ProcessConfig;
use crate::record::PhotoRecord;
use crate::style::Style;
use crate::{exif, filters, naming, orient};

/// Pipeline stages, in execution order. Carried in [`PipelineError`] so
/// diagnostics name where a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    MetadataExtracted,
    Normalized,
    StyleResolved,
    Filtered,
    Saved,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Loading => "loading",
            Stage::MetadataExtracted => "metadata extraction",
            Stage::Normalized => "orientation normalization",
            Stage::StyleResolved => "style resolution",
            Stage::Filtered => "filtering",
            Stage::Saved => "saving",
        };
        f.write_str(name)
    }
}

/// Cause of a post-load failure, preserved for diagnostics.
#[derive(Error, Debug)]
pub enum ProcessingCause {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image encode failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("unsupported output extension {0:?}")]
    UnsupportedFormat(String),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input could not be read or decoded. Nothing was processed and
    /// nothing was written.
    #[error("cannot load source image {}: {cause}", path.display())]
    SourceNotFound { path: PathBuf, cause: String },
    /// A failure after the source decoded, with the stage it occurred in.
    #[error("processing failed during {stage}: {cause}")]
    Processing {
        stage: Stage,
        #[source]
        cause: ProcessingCause,
    },
}

impl PipelineError {
    /// Process exit code reported to the calling backend. The two fatal
    /// conditions are distinguishable without parsing stderr.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::SourceNotFound { .. } => 2,
            PipelineError::Processing { .. } => 1,
        }
    }
}

/// One processing request, as handed over by the backend.
#[derive(Debug, Clone)]
pub struct ProcessRequest<'a> {
    /// Source image path (JPEG or PNG).
    pub input: &'a Path,
    /// Directory the output file is written into.
    pub output_dir: &'a Path,
    /// Caller-supplied opaque identifier; carries filename uniqueness.
    pub result_id: &'a str,
    /// Externally resolved style label, if the classifier produced one.
    pub style_label: Option<&'a str>,
    /// Upload filename as the user named it. The backend hands over a
    /// bare temp path, so the output extension comes from here; falls
    /// back to the input path's own name.
    pub original_name: Option<&'a str>,
}

/// Run the full pipeline for one image.
pub fn process(
    request: &ProcessRequest<'_>,
    config: &ProcessConfig,
) -> Result<PhotoRecord, PipelineError> {
    let load_error = |cause: String| PipelineError::SourceNotFound {
        path: request.input.to_path_buf(),
        cause,
    };

    let bytes = fs::read(request.input).map_err(|e| load_error(e.to_string()))?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| load_error(e.to_string()))?;
    let img = decoded.to_rgb8();
    debug!("{}: {}x{}", Stage::Loading, img.width(), img.height());

    // Extraction is total; absent metadata is a normal outcome.
    let tags = exif::read_tags(&bytes);
    let capture = tags.as_ref().and_then(exif::get_datetime);
    let location = tags.as_ref().and_then(exif::get_gps);
    debug!(
        "{}: date_time={} location={}",
        Stage::MetadataExtracted,
        capture.is_some(),
        location.is_some()
    );

    let upright = orient::normalize(img, tags.as_ref());
    debug!("{}: {}x{}", Stage::Normalized, upright.width(), upright.height());

    let style = match request.style_label {
        Some(label) => Style::parse(label),
        None => {
            debug!("no style label supplied, defaulting to vivid");
            Style::Vivid
        }
    };
    debug!("{}: {style}", Stage::StyleResolved);

    let filtered = filters::apply(style, &upright, config);
    debug!("{}", Stage::Filtered);

    let original_name = match request.original_name {
        Some(name) => name.to_string(),
        None => request
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    let filename = naming::output_filename(request.result_id, capture, &original_name);

    let encoded = encode(&filtered, &filename, config.output.jpeg_quality)
        .map_err(|cause| PipelineError::Processing {
            stage: Stage::Saved,
            cause,
        })?;
    fs::create_dir_all(request.output_dir).map_err(|e| PipelineError::Processing {
        stage: Stage::Saved,
        cause: e.into(),
    })?;
    fs::write(request.output_dir.join(&filename), encoded).map_err(|e| {
        PipelineError::Processing {
            stage: Stage::Saved,
            cause: e.into(),
        }
    })?;
    debug!("{}: {filename}", Stage::Saved);

    Ok(PhotoRecord {
        date_time: capture.map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        location,
        style,
        filepath: format!("{}/{}", config.public_prefix, filename),
    })
}

/// Encode the buffer for the given filename's extension.
///
/// The extension came from the original upload, so JPEG and PNG are the
/// expected cases; anything else is refused rather than silently written
/// with mismatched bytes.
fn encode(img: &RgbImage, filename: &str, jpeg_quality: u8) -> Result<Vec<u8>, ProcessingCause> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let mut out = Vec::new();
    match ext.as_str() {
        "jpg" | "jpeg" => {
            img.write_with_encoder(JpegEncoder::new_with_quality(&mut out, jpeg_quality))?;
        }
        "png" => {
            img.write_with_encoder(PngEncoder::new(&mut out))?;
        }
        other => return Err(ProcessingCause::UnsupportedFormat(other.to_string())),
    }
    Ok(out)
}
