//! Content-type sniffing from file bytes.
//!
//! The file name is never consulted. Detection runs in three stages over a
//! bounded prefix of the file: binary signatures, text classification, and
//! finally a CSV shape test (consistent comma-separated field counts).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csvcheck_model::{MimeGuess, TEXT_CSV};
use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::{IngestError, Result};

/// Bytes read from the start of a file for sniffing.
pub const DEFAULT_SNIFF_LIMIT: usize = 8 * 1024;

/// Records inspected when judging CSV uniformity.
pub const DEFAULT_SAMPLE_RECORDS: usize = 64;

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Known leading byte signatures.
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"PK\x03\x04", "application/zip"),
    (b"PK\x05\x06", "application/zip"),
    (b"\x1f\x8b", "application/gzip"),
    (b"BZh", "application/x-bzip2"),
    (b"\xfd7zXZ\x00", "application/x-xz"),
    (b"7z\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
    (b"\x7fELF", "application/x-executable"),
    (b"SQLite format 3\x00", "application/vnd.sqlite3"),
    (
        b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1",
        "application/x-ole-storage",
    ),
    (b"PAR1", "application/vnd.apache.parquet"),
];

/// Control bytes (other than whitespace) allowed per 100 bytes of text.
const MAX_CONTROL_PERCENT: usize = 10;

#[derive(Debug, Clone)]
pub struct MimeSniffer {
    limit: usize,
    sample_records: usize,
}

impl Default for MimeSniffer {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SNIFF_LIMIT,
            sample_records: DEFAULT_SAMPLE_RECORDS,
        }
    }
}

impl MimeSniffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn with_sample_records(mut self, records: usize) -> Self {
        self.sample_records = records.max(2);
        self
    }

    /// Sniffs the first bytes of the file at `path`.
    pub fn sniff_path(&self, path: &Path) -> Result<MimeGuess> {
        let file = File::open(path).map_err(|e| IngestError::file_read(path, e))?;
        let mut prefix = Vec::with_capacity(self.limit);
        // Read one byte past the limit to learn whether the prefix is truncated.
        file.take(self.limit as u64 + 1)
            .read_to_end(&mut prefix)
            .map_err(|e| IngestError::file_read(path, e))?;
        let truncated = prefix.len() > self.limit;
        prefix.truncate(self.limit);

        let guess = self.sniff_bytes(&prefix, truncated);
        tracing::debug!(path = %path.display(), mime = %guess, "Sniffed content type");
        Ok(guess)
    }

    /// Sniffs an in-memory prefix. `truncated` means more bytes follow, so a
    /// trailing partial line is dropped before the CSV shape test.
    pub fn sniff_bytes(&self, bytes: &[u8], truncated: bool) -> MimeGuess {
        if bytes.is_empty() {
            return MimeGuess::new(TEXT_PLAIN);
        }

        if let Some((_, mime)) = SIGNATURES
            .iter()
            .find(|(signature, _)| bytes.starts_with(signature))
        {
            return MimeGuess::new(*mime);
        }

        let Some(text) = decode_text(bytes, truncated) else {
            return MimeGuess::new(OCTET_STREAM);
        };

        if let Some(mime) = markup_type(&text) {
            return MimeGuess::new(mime);
        }

        if self.looks_like_csv(&text, truncated) {
            return MimeGuess::new(TEXT_CSV);
        }

        MimeGuess::new(TEXT_PLAIN)
    }

    /// At least two records, all with the same field count, and at least two
    /// fields each.
    fn looks_like_csv(&self, text: &str, truncated: bool) -> bool {
        let body = if truncated {
            match text.rfind('\n') {
                Some(end) => &text[..end],
                None => return false,
            }
        } else {
            text
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes());

        let mut width = None;
        let mut records = 0usize;
        for result in reader.byte_records().take(self.sample_records) {
            let Ok(record) = result else {
                return false;
            };
            if record.len() < 2 {
                return false;
            }
            match width {
                None => width = Some(record.len()),
                Some(expected) if expected != record.len() => return false,
                Some(_) => {}
            }
            records += 1;
        }

        records >= 2
    }
}

/// Decodes a prefix as text, or `None` when it looks binary.
fn decode_text(bytes: &[u8], truncated: bool) -> Option<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (!is_binary(text.as_bytes())).then(|| text.into_owned());
    }

    if is_binary(bytes) {
        return None;
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text.to_string()),
        // A multi-byte sequence cut off by the sniff limit is not an error.
        Err(err) if truncated && err.error_len().is_none() => {
            Some(String::from_utf8_lossy(&bytes[..err.valid_up_to()]).into_owned())
        }
        Err(_) => Some(WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()),
    }
}

fn is_binary(bytes: &[u8]) -> bool {
    if bytes.contains(&0) {
        return true;
    }
    let control = bytes
        .iter()
        .filter(|&&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0c | 0x1b))
        .count();
    control * 100 > bytes.len() * MAX_CONTROL_PERCENT
}

fn markup_type(text: &str) -> Option<&'static str> {
    let head = text.trim_start();
    let lower = head.chars().take(16).collect::<String>().to_ascii_lowercase();
    if lower.starts_with("<?xml") {
        Some("application/xml")
    } else if lower.starts_with("<!doctype html") || lower.starts_with("<html") {
        Some("text/html")
    } else if head.starts_with('{') {
        Some("application/json")
    } else {
        None
    }
}

/// Sniffs `path` with the default sniffer.
pub fn sniff_path(path: &Path) -> Result<MimeGuess> {
    MimeSniffer::default().sniff_path(path)
}
