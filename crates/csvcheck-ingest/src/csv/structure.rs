//! Strict RFC4180 record boundaries.
//!
//! The `csv` crate is lenient: it accepts stray quotes, text after a closing
//! quote, and a quoted field cut off by end of file, and it skips empty
//! lines. This pass walks the raw bytes once, rejects those inputs, and
//! reports every record (blank lines included) with its width and starting
//! line. It only looks at ASCII delimiters, so any ASCII-compatible
//! encoding can be scanned.

use thiserror::Error;

/// A quoting rule broken at `line` (1-based) in `field` (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("quote inside unquoted field {field} at line {line}")]
    QuoteInUnquotedField { line: u64, field: usize },

    #[error("unexpected character after closing quote in field {field} at line {line}")]
    TextAfterClosingQuote { line: u64, field: usize },

    #[error("end of file inside quoted field {field} starting at line {line}")]
    UnterminatedQuote { line: u64, field: usize },
}

impl StructureError {
    pub fn line(&self) -> u64 {
        match self {
            Self::QuoteInUnquotedField { line, .. }
            | Self::TextAfterClosingQuote { line, .. }
            | Self::UnterminatedQuote { line, .. } => *line,
        }
    }
}

/// One record as laid out in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordShape {
    /// Physical line the record starts on.
    pub line: u64,
    /// Number of fields.
    pub width: usize,
    /// An empty line; parsed as a single empty field.
    pub blank: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    RecordStart,
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote seen inside a quoted field: either an escape or the close.
    QuoteInQuoted,
}

/// Splits `bytes` into records, failing on the first quoting violation.
pub fn scan_records(bytes: &[u8]) -> Result<Vec<RecordShape>, StructureError> {
    let mut shapes = Vec::new();
    let mut state = State::RecordStart;
    let mut line = 1u64;
    let mut record_line = 1u64;
    let mut field = 1usize;
    let mut quote_line = 1u64;
    let mut index = 0;

    while index < bytes.len() {
        let byte = bytes[index];
        // CRLF is one terminator
        let crlf = byte == b'\r' && bytes.get(index + 1) == Some(&b'\n');
        match (state, byte) {
            (State::Quoted, b'"') => state = State::QuoteInQuoted,
            (State::Quoted, b'\n' | b'\r') => {
                if !crlf {
                    line += 1;
                }
            }
            (State::Quoted, _) => {}
            (State::RecordStart | State::FieldStart, b'"') => {
                state = State::Quoted;
                quote_line = line;
            }
            (State::QuoteInQuoted, b'"') => state = State::Quoted,
            (State::Unquoted, b'"') => {
                return Err(StructureError::QuoteInUnquotedField { line, field });
            }
            (_, b',') => {
                field += 1;
                state = State::FieldStart;
            }
            (_, b'\n' | b'\r') => {
                shapes.push(RecordShape {
                    line: record_line,
                    width: field,
                    blank: state == State::RecordStart,
                });
                if crlf {
                    index += 1;
                }
                line += 1;
                record_line = line;
                field = 1;
                state = State::RecordStart;
            }
            (State::QuoteInQuoted, _) => {
                return Err(StructureError::TextAfterClosingQuote { line, field });
            }
            (State::RecordStart | State::FieldStart | State::Unquoted, _) => {
                state = State::Unquoted;
            }
        }
        index += 1;
    }

    match state {
        State::Quoted => Err(StructureError::UnterminatedQuote {
            line: quote_line,
            field,
        }),
        State::RecordStart => Ok(shapes),
        _ => {
            shapes.push(RecordShape {
                line: record_line,
                width: field,
                blank: false,
            });
            Ok(shapes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths(input: &str) -> Vec<usize> {
        scan_records(input.as_bytes())
            .unwrap()
            .iter()
            .map(|shape| shape.width)
            .collect()
    }

    #[test]
    fn test_simple_records() {
        assert_eq!(widths("h1,h2\n1,2\n3,4,5\n"), vec![2, 2, 3]);
        assert_eq!(widths("a,b\r\n1,2"), vec![2, 2]);
        assert_eq!(widths(""), Vec::<usize>::new());
    }

    #[test]
    fn test_blank_lines_are_records() {
        let shapes = scan_records(b"h1,h2\n1,2\n\n3,4\n").unwrap();
        assert_eq!(shapes.len(), 4);
        assert_eq!(
            shapes[2],
            RecordShape {
                line: 3,
                width: 1,
                blank: true
            }
        );
        assert_eq!(shapes[3].line, 4);
    }

    #[test]
    fn test_quoted_fields() {
        let shapes = scan_records(b"a,b\n\"x, y\",\"say \"\"hi\"\"\"\n\"multi\nline\",z\nlast,\"\"\n")
            .unwrap();
        let lines: Vec<u64> = shapes.iter().map(|shape| shape.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 5]);
        assert!(shapes.iter().all(|shape| shape.width == 2 && !shape.blank));
    }

    #[test]
    fn test_quoted_empty_field_is_not_blank() {
        let shapes = scan_records(b"\"\"\n").unwrap();
        assert!(!shapes[0].blank);
    }

    #[test]
    fn test_quote_inside_unquoted_field() {
        assert_eq!(
            scan_records(b"h1,h2\nab\"c,2\n"),
            Err(StructureError::QuoteInUnquotedField { line: 2, field: 1 })
        );
    }

    #[test]
    fn test_text_after_closing_quote() {
        assert_eq!(
            scan_records(b"h1,h2\n\"a\"b,2\n"),
            Err(StructureError::TextAfterClosingQuote { line: 2, field: 1 })
        );
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            scan_records(b"h1,h2\n1,\"abc"),
            Err(StructureError::UnterminatedQuote { line: 2, field: 2 })
        );
        let err = scan_records(b"h1,h2\n\"abc,2\n").unwrap_err();
        assert_eq!(err.line(), 2);
    }
}
