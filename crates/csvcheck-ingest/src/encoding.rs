//! Streaming character encoding detection.
//!
//! The detector is fed chunks of a byte stream and settles on a charset once
//! it has enough evidence:
//!
//! - a byte order mark decides immediately (UTF-8, UTF-16LE, UTF-16BE)
//! - any malformed UTF-8 sequence rules UTF-8 out; the stream is then
//!   classified as the single-byte `windows-1252`
//! - valid multi-byte UTF-8 sequences accumulate as evidence for UTF-8
//!
//! Pure 7-bit input never produces a confident answer: it is valid in every
//! ASCII-compatible encoding.
//!
//! Detector state belongs to one stream. Use [`CharsetDetector::reset`] or a
//! fresh detector before feeding another file.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csvcheck_model::EncodingGuess;
use encoding_rs::{Decoder, DecoderResult, Encoding, UTF_8, WINDOWS_1252};

use crate::error::{IngestError, Result};

/// Read size used when streaming files into the detector.
pub const CHUNK_SIZE: usize = 4096;

/// Multi-byte sequences after which UTF-8 is considered certain.
const UTF8_CONFIDENT_SEQUENCES: usize = 64;

/// Longest byte order mark (UTF-8).
const BOM_PROBE_LEN: usize = 3;

pub struct CharsetDetector {
    decoder: Decoder,
    scratch: String,
    bom_probe: Vec<u8>,
    bom_checked: bool,
    multibyte_sequences: usize,
    utf8_ruled_out: bool,
    detected: Option<&'static Encoding>,
    done: bool,
}

impl CharsetDetector {
    pub fn new() -> Self {
        Self {
            decoder: UTF_8.new_decoder_without_bom_handling(),
            scratch: String::new(),
            bom_probe: Vec::with_capacity(BOM_PROBE_LEN),
            bom_checked: false,
            multibyte_sequences: 0,
            utf8_ruled_out: false,
            detected: None,
            done: false,
        }
    }

    /// Feeds the next chunk of the stream. Ignored once the detector is done.
    pub fn feed(&mut self, bytes: &[u8]) {
        if self.done || bytes.is_empty() {
            return;
        }

        let mut input = bytes;
        if !self.bom_checked {
            let take = (BOM_PROBE_LEN - self.bom_probe.len()).min(input.len());
            self.bom_probe.extend_from_slice(&input[..take]);
            input = &input[take..];
            if self.bom_probe.len() < BOM_PROBE_LEN {
                return;
            }
            self.bom_checked = true;
            if self.settle_on_bom() {
                return;
            }
            let probe = std::mem::take(&mut self.bom_probe);
            self.scan(&probe, false);
        }

        self.scan(input, false);
    }

    /// True once further input cannot change the result.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Signals end of stream and returns the decision.
    pub fn finish(&mut self) -> EncodingGuess {
        if !self.done {
            if self.bom_checked {
                self.scan(&[], true);
            } else {
                self.bom_checked = true;
                if !self.settle_on_bom() {
                    let probe = std::mem::take(&mut self.bom_probe);
                    self.scan(&probe, true);
                }
            }
        }

        if !self.done {
            self.done = true;
            if self.multibyte_sequences > 0 {
                self.detected = Some(UTF_8);
            }
        }

        self.guess()
    }

    /// Decision so far; `None` until confident.
    pub fn detected(&self) -> Option<&'static Encoding> {
        self.detected
    }

    pub fn guess(&self) -> EncodingGuess {
        self.detected
            .map_or_else(EncodingGuess::undetermined, |encoding| {
                EncodingGuess::detected(encoding.name())
            })
    }

    /// Clears all state so the detector can be used for another stream.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn settle(&mut self, encoding: &'static Encoding) {
        self.detected = Some(encoding);
        self.done = true;
    }

    fn settle_on_bom(&mut self) -> bool {
        match Encoding::for_bom(&self.bom_probe) {
            Some((encoding, _)) => {
                self.settle(encoding);
                true
            }
            None => false,
        }
    }

    fn scan(&mut self, bytes: &[u8], last: bool) {
        if self.done {
            return;
        }

        let mut remaining = bytes;
        loop {
            self.scratch.clear();
            if let Some(needed) = self
                .decoder
                .max_utf8_buffer_length_without_replacement(remaining.len())
            {
                self.scratch.reserve(needed);
            }
            let (result, read) = self.decoder.decode_to_string_without_replacement(
                remaining,
                &mut self.scratch,
                last,
            );
            self.multibyte_sequences += self
                .scratch
                .chars()
                .filter(|c| c.len_utf8() > 1)
                .count();
            remaining = &remaining[read..];

            match result {
                DecoderResult::InputEmpty => break,
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(_, _) => {
                    self.utf8_ruled_out = true;
                    break;
                }
            }
        }

        if self.utf8_ruled_out {
            self.settle(WINDOWS_1252);
        } else if self.multibyte_sequences >= UTF8_CONFIDENT_SEQUENCES {
            self.settle(UTF_8);
        }
    }
}

impl Default for CharsetDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CharsetDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharsetDetector")
            .field("multibyte_sequences", &self.multibyte_sequences)
            .field("utf8_ruled_out", &self.utf8_ruled_out)
            .field("detected", &self.detected.map(Encoding::name))
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Streams `reader` through `detector` in [`CHUNK_SIZE`] chunks, stopping as
/// soon as the detector is done.
pub fn detect_reader<R: Read>(
    mut reader: R,
    detector: &mut CharsetDetector,
) -> std::io::Result<EncodingGuess> {
    let mut buf = [0u8; CHUNK_SIZE];
    while !detector.is_done() {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        detector.feed(&buf[..read]);
    }
    Ok(detector.finish())
}

/// Detects the charset of the file at `path` with a fresh detector.
pub fn detect_file(path: &Path) -> Result<EncodingGuess> {
    let file = File::open(path).map_err(|e| IngestError::file_read(path, e))?;
    let mut detector = CharsetDetector::new();
    detect_reader(file, &mut detector).map_err(|e| IngestError::file_read(path, e))
}

/// Resolves an encoding label ("utf8", "UTF-8", "latin1") to its canonical
/// encoding.
pub fn canonical_encoding(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// True when both labels name the same encoding.
pub fn same_encoding(a: &str, b: &str) -> bool {
    match (canonical_encoding(a), canonical_encoding(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.eq_ignore_ascii_case(b),
    }
}
