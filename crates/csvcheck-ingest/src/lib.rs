//! Input side of csvcheck.
//!
//! This crate finds candidate files under a root directory and provides the
//! detectors the validation rules are built on.
//!
//! # Features
//!
//! - **Discovery**: recursive listing, optionally filtered by extension
//! - **CSV Parsing**: RFC4180 records, with or without a header row
//! - **Charset Detection**: streaming detector with an explicit reset
//! - **Content Sniffing**: MIME type from bytes, independent of the name
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use csvcheck_ingest::{HeaderMode, default_suffixes, detect_file, list_csv_files, read_csv_document};
//!
//! let files = list_csv_files(Path::new("src"), &default_suffixes())?;
//! for file in &files {
//!     let encoding = detect_file(file.path())?;
//!     let doc = read_csv_document(file.path(), HeaderMode::FirstRecord)?;
//! }
//! ```

mod csv;
mod discovery;
mod encoding;
mod error;
mod mime;

// === Error Types ===
pub use error::{IngestError, ParseError, Result};

// === File Discovery ===
pub use discovery::{
    DEFAULT_CSV_SUFFIXES, default_suffixes, discover_files, list_all_files, list_csv_files,
};

// === CSV Reading ===
pub use self::csv::{
    HeaderMode, RecordShape, StructureError, parse_document, parse_record_widths,
    read_csv_document, read_record_widths, scan_records,
};

// === Encoding Detection ===
pub use encoding::{
    CHUNK_SIZE, CharsetDetector, canonical_encoding, detect_file, detect_reader, same_encoding,
};

// === Content Sniffing ===
pub use mime::{
    DEFAULT_SAMPLE_RECORDS, DEFAULT_SNIFF_LIMIT, MimeSniffer, OCTET_STREAM, TEXT_PLAIN, sniff_path,
};
