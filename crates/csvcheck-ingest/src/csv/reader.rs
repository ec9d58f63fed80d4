//! RFC4180 record parsing.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use csvcheck_model::{CsvDocument, Record};

use super::structure::{RecordShape, scan_records};
use crate::error::{IngestError, ParseError, Result};

/// Whether the first record is data or a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Row 0 is data.
    #[default]
    None,
    /// Row 0 is consumed as the header.
    FirstRecord,
}

/// Comma-delimited, double-quote, no trimming, variable field counts.
fn rfc4180_reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .quoting(true)
        .trim(Trim::None)
        .flexible(true)
        .has_headers(false)
        .from_reader(bytes)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| IngestError::file_read(path, e))
}

/// Pairs scanned shapes with parsed records. The `csv` reader skips empty
/// lines, so blank shapes become a single empty field here.
fn merge_records(shapes: &[RecordShape], parsed: Vec<StringRecord>) -> Vec<Record> {
    let mut parsed = parsed.into_iter();
    shapes
        .iter()
        .filter_map(|shape| {
            if shape.blank {
                Some(Record::new(vec![String::new()], shape.line))
            } else {
                parsed.next().map(|record| {
                    Record::new(record.iter().map(ToString::to_string).collect(), shape.line)
                })
            }
        })
        .collect()
}

/// Parses `bytes` into a document. Quoting must be strict RFC4180 and
/// fields must be valid UTF-8.
pub fn parse_document(
    bytes: &[u8],
    header: HeaderMode,
) -> std::result::Result<CsvDocument, ParseError> {
    let shapes = scan_records(bytes)?;

    let mut parsed = Vec::with_capacity(shapes.len());
    for result in rfc4180_reader(bytes).records() {
        parsed.push(result?);
    }

    let mut records = merge_records(&shapes, parsed);
    let header_record = match header {
        HeaderMode::FirstRecord if !records.is_empty() => Some(records.remove(0)),
        _ => None,
    };

    Ok(CsvDocument::new(header_record, records))
}

/// Reads and parses a CSV file.
pub fn read_csv_document(path: &Path, header: HeaderMode) -> Result<CsvDocument> {
    let bytes = read(path)?;
    parse_document(&bytes, header).map_err(|e| IngestError::csv_parse(path, &e))
}

/// Field count of every record in `bytes`, header and blank lines included.
///
/// Works on raw bytes so files in any ASCII-compatible encoding can be
/// counted.
pub fn parse_record_widths(bytes: &[u8]) -> std::result::Result<Vec<usize>, ParseError> {
    let shapes = scan_records(bytes)?;
    Ok(shapes.iter().map(|shape| shape.width).collect())
}

/// Reads a CSV file and returns the field count of every record.
pub fn read_record_widths(path: &Path) -> Result<Vec<usize>> {
    let bytes = read(path)?;
    parse_record_widths(&bytes).map_err(|e| IngestError::csv_parse(path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_parse_without_header() {
        let doc = parse_document("h1,h2\n1,2\n".as_bytes(), HeaderMode::None).unwrap();
        assert!(doc.header().is_none());
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.records()[0].fields, vec!["h1", "h2"]);
        assert_eq!(doc.records()[1].line, 2);
    }

    #[test]
    fn test_parse_with_header() {
        let doc = parse_document("h1,h2\n 1,2\n".as_bytes(), HeaderMode::FirstRecord).unwrap();
        assert_eq!(doc.header().unwrap().fields, vec!["h1", "h2"]);
        assert_eq!(doc.len(), 1);
        // Whitespace is preserved
        assert_eq!(doc.records()[0].fields, vec![" 1", "2"]);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let data = "a,b\n\"x, y\",\"say \"\"hi\"\"\"\n\"multi\nline\",z\n";
        let doc = parse_document(data.as_bytes(), HeaderMode::FirstRecord).unwrap();
        assert_eq!(doc.records()[0].fields, vec!["x, y", "say \"hi\""]);
        assert_eq!(doc.records()[1].fields, vec!["multi\nline", "z"]);
    }

    #[test]
    fn test_parse_empty_input() {
        let doc = parse_document("".as_bytes(), HeaderMode::FirstRecord).unwrap();
        assert!(doc.header().is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_invalid_utf8_fails() {
        let result = parse_document(&b"h1,h2\n\xe9t\xe9,2\n"[..], HeaderMode::FirstRecord);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_widths_are_flexible() {
        let widths = parse_record_widths("h1,h2\n1,2\n3,4,5\n".as_bytes()).unwrap();
        assert_eq!(widths, vec![2, 2, 3]);
    }

    #[test]
    fn test_record_widths_accept_latin1() {
        let widths = parse_record_widths(&b"a,b\n\xe9,\xe8\n"[..]).unwrap();
        assert_eq!(widths, vec![2, 2]);
    }

    #[test]
    fn test_record_widths_count_blank_lines() {
        let widths = parse_record_widths(b"h1,h2\n1,2\n\n3,4\n").unwrap();
        assert_eq!(widths, vec![2, 2, 1, 2]);
    }

    #[test]
    fn test_blank_line_is_single_empty_field() {
        let doc = parse_document(b"h1,h2\n\n 1,2\n", HeaderMode::FirstRecord).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.records()[0].fields, vec![""]);
        assert_eq!(doc.records()[0].line, 2);
        assert_eq!(doc.records()[1].line, 3);
    }

    #[test]
    fn test_malformed_quoting_is_rejected() {
        let inputs: [&[u8]; 3] = [
            b"h1,h2\n\"a\"b,2\n",
            b"h1,h2\n1,\"abc",
            b"h1,h2\nx\"y,2\n",
        ];
        for input in inputs {
            let result = parse_document(input, HeaderMode::FirstRecord);
            assert!(matches!(result, Err(ParseError::Structure(_))), "{input:?}");
        }
    }

    #[test]
    fn test_read_csv_document_reports_unterminated_quote() {
        let file = create_temp_csv(b"h1,h2\n\"abc,2\n");
        let err = read_csv_document(file.path(), HeaderMode::FirstRecord).unwrap_err();
        assert!(matches!(err, IngestError::CsvParse { line: Some(2), .. }));
    }

    #[test]
    fn test_read_csv_document_from_file() {
        let file = create_temp_csv(b"A,B,C\n1,2,3\n4,5,6\n");
        let doc = read_csv_document(file.path(), HeaderMode::FirstRecord).unwrap();
        assert_eq!(doc.header().unwrap().fields, vec!["A", "B", "C"]);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_read_csv_document_reports_path() {
        let file = create_temp_csv(b"A,B\n\xff,1\n");
        let err = read_csv_document(file.path(), HeaderMode::FirstRecord).unwrap_err();
        assert!(matches!(err, IngestError::CsvParse { .. }));
        assert!(err.to_string().contains("invalid UTF-8"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_record_widths(&dir.path().join("gone.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
