//! Detector results: charset and content type.

use serde::{Deserialize, Serialize};

/// Canonical CSV content type.
pub const TEXT_CSV: &str = "text/csv";

/// Result of charset detection for one file.
///
/// `charset` is `None` when the detector could not reach a confident
/// decision (pure ASCII, empty input).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingGuess {
    pub charset: Option<String>,
}

impl EncodingGuess {
    pub fn detected(charset: impl Into<String>) -> Self {
        Self {
            charset: Some(charset.into()),
        }
    }

    pub fn undetermined() -> Self {
        Self::default()
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn is_confident(&self) -> bool {
        self.charset.is_some()
    }
}

/// Content type inferred from file bytes, independent of the file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeGuess(String);

impl MimeGuess {
    pub fn new(mime: impl Into<String>) -> Self {
        Self(mime.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_csv(&self) -> bool {
        self.0 == TEXT_CSV
    }
}

impl std::fmt::Display for MimeGuess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
