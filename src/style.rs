//! Style label resolution.
//!
//! The style label arrives from outside — the backend passes the verdict of
//! a remote vision model on the command line. The model is not trusted to be
//! well-behaved: labels come back uppercased, quoted, padded, or as error
//! strings, and the pipeline must still produce an image. Every input
//! resolves to a [`Style`]; anything unrecognized falls back to
//! [`Style::Vivid`] with a log line, never an error.
//!
//! The remote call itself stays behind the [`Classifier`] trait so library
//! users can inject their own client (or a test double). The resolution
//! policy at that boundary is one retry, then the same vivid fallback.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The three cosmetic filters the pipeline can apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Contrast + saturation + sharpening boost.
    #[default]
    Vivid,
    /// Desaturated, darkened, cool-shifted.
    Sad,
    /// Edge-preserving grayscale stylization.
    Sketch,
}

impl Style {
    /// Resolve an external label to a style.
    ///
    /// Lenient on purpose: surrounding whitespace and quote characters are
    /// stripped and the comparison is case-insensitive, because the labels
    /// come out of a language model. Unrecognized input (including empty)
    /// resolves to `Vivid` — the fallback is logged but silent to the
    /// caller, since an output image must always be produced.
    pub fn parse(label: &str) -> Style {
        let cleaned = label
            .trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"')
            .to_ascii_lowercase();
        match cleaned.as_str() {
            "vivid" => Style::Vivid,
            "sad" => Style::Sad,
            "sketch" => Style::Sketch,
            other => {
                warn!("unrecognized style label {other:?}, falling back to vivid");
                Style::Vivid
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Vivid => "vivid",
            Style::Sad => "sad",
            Style::Sketch => "sketch",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("classification request failed: {0}")]
    Request(String),
    #[error("classification timed out after {0} ms")]
    Timeout(u64),
}

/// Boundary to the remote vision model.
///
/// Implementations are expected to bound their own request time; the
/// pipeline treats any error as retryable exactly once.
pub trait Classifier {
    /// Classify raw image bytes into a style label.
    fn classify(&self, image: &[u8]) -> Result<String, ClassifyError>;
}

/// Number of classification attempts before giving up (initial + one retry).
const CLASSIFY_ATTEMPTS: usize = 2;

/// Ask the classifier for a label and resolve it to a style.
///
/// One retry on error, then the standard vivid fallback — the same
/// degrade-gracefully contract as [`Style::parse`].
pub fn resolve(classifier: &dyn Classifier, image: &[u8]) -> Style {
    for attempt in 1..=CLASSIFY_ATTEMPTS {
        match classifier.classify(image) {
            Ok(label) => return Style::parse(&label),
            Err(e) => {
                warn!("classification attempt {attempt}/{CLASSIFY_ATTEMPTS} failed: {e}");
            }
        }
    }
    Style::Vivid
}
