//! Error types for discovery and file ingestion.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::csv::StructureError;

/// Errors that can occur while discovering or reading files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Discovery Errors ===
    /// Root directory missing or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Walking the tree failed part-way; the enumeration would be incomplete.
    #[error("failed to walk directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    // === File Errors ===
    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the file.
    #[error(
        "failed to parse CSV {path}{}: {message}",
        .line.map(|l| format!(" at line {l}")).unwrap_or_default()
    )]
    CsvParse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },
}

impl IngestError {
    /// True for errors that come from discovery rather than a single file.
    pub fn is_discovery(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound { .. } | Self::DirectoryWalk { .. }
        )
    }

    pub(crate) fn file_read(path: &Path, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv_parse(path: &Path, error: &ParseError) -> Self {
        Self::CsvParse {
            path: path.to_path_buf(),
            line: error.line(),
            message: error.message(),
        }
    }
}

/// Why in-memory CSV content was rejected.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Quoting or record boundaries break RFC4180.
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// The `csv` reader failed, typically on invalid UTF-8.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl ParseError {
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Structure(error) => Some(error.line()),
            Self::Csv(error) => error.position().map(csv::Position::line),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Structure(error) => error.to_string(),
            Self::Csv(error) => csv_error_message(error),
        }
    }
}

/// Message for a CSV error without the position prefix the csv crate adds.
fn csv_error_message(error: &csv::Error) -> String {
    match error.kind() {
        csv::ErrorKind::Io(err) => err.to_string(),
        csv::ErrorKind::Utf8 { err, .. } => format!(
            "invalid UTF-8 in field {} (valid up to byte {})",
            err.field() + 1,
            err.valid_up_to()
        ),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("found record with {len} fields, expected {expected_len}"),
        _ => error.to_string(),
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
