//! RFC4180 compliance: the file must parse with a header row, and no data
//! field may carry leading or trailing whitespace.
//!
//! Parse failures and untrimmed values are reported as distinct failure
//! kinds ([`FailureKind::Parse`] and [`FailureKind::TrimViolation`]).

use csvcheck_ingest::{HeaderMode, IngestError, read_csv_document};
use csvcheck_model::{
    CandidateFile, CsvDocument, FailureKind, Location, RuleKind, ValidationOutcome,
};
use tracing::trace;

/// An untrimmed data field. Row and column are 1-based; row 1 is the first
/// record after the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntrimmedField {
    pub row: u64,
    pub column: u64,
    pub line: u64,
    pub value: String,
}

/// Strips leading and trailing spaces and ASCII control characters.
pub fn trim_field(value: &str) -> &str {
    value.trim_matches(|c: char| c <= ' ')
}

pub fn is_trimmed(value: &str) -> bool {
    trim_field(value).len() == value.len()
}

/// First data field that is not equal to its trimmed form. Header values
/// are not inspected.
pub fn find_untrimmed(document: &CsvDocument) -> Option<UntrimmedField> {
    document
        .records()
        .iter()
        .enumerate()
        .find_map(|(index, record)| {
            trace!(line = record.line, first = record.get(0).unwrap_or(""), "Record");
            record
                .fields
                .iter()
                .position(|value| !is_trimmed(value))
                .map(|column| UntrimmedField {
                    row: index as u64 + 1,
                    column: column as u64 + 1,
                    line: record.line,
                    value: record.fields[column].clone(),
                })
        })
}

pub fn check(file: &CandidateFile) -> ValidationOutcome {
    let document = match read_csv_document(file.path(), HeaderMode::FirstRecord) {
        Ok(document) => document,
        Err(error) => {
            let kind = match error {
                IngestError::FileRead { .. } => FailureKind::Io,
                _ => FailureKind::Parse,
            };
            return ValidationOutcome::fail(
                RuleKind::Rfc4180Compliance,
                file.path(),
                kind,
                format!(
                    "csv File <{}> is NOT compliant with rfc4180 ({error})",
                    file.path().display()
                ),
            );
        }
    };

    match find_untrimmed(&document) {
        None => ValidationOutcome::pass(
            RuleKind::Rfc4180Compliance,
            file.path(),
            format!("{} data rows, all fields trimmed", document.len()),
        ),
        Some(field) => ValidationOutcome::fail(
            RuleKind::Rfc4180Compliance,
            file.path(),
            FailureKind::TrimViolation,
            format!(
                "Datas should be trimmed (see row <{}> column <{}> on <{}>) in <{}>",
                field.row,
                field.column,
                field.value,
                file.path().display()
            ),
        )
        .at(
            Location::row(field.row)
                .with_column(field.column)
                .with_line(field.line)
                .with_value(field.value),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> CandidateFile {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        CandidateFile::new(path)
    }

    #[test]
    fn test_trim_field() {
        assert_eq!(trim_field(" 1"), "1");
        assert_eq!(trim_field("\t1\r"), "1");
        assert_eq!(trim_field("a b"), "a b");
        assert!(is_trimmed(""));
        assert!(is_trimmed("x"));
        assert!(!is_trimmed("x "));
    }

    #[test]
    fn leading_space_in_first_data_row() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "b.csv", b"h1,h2\n 1,2\n");
        let outcome = check(&file);
        assert_eq!(outcome.failure, Some(FailureKind::TrimViolation));
        assert_eq!(
            outcome.location,
            Some(
                Location::row(1)
                    .with_column(1)
                    .with_line(2)
                    .with_value(" 1")
            )
        );
        assert!(outcome.message.contains("row <1> column <1> on < 1>"));
    }

    #[test]
    fn header_whitespace_is_ignored() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "h.csv", b" h1 ,h2\n1,2\n");
        assert!(check(&file).is_pass());
    }

    #[test]
    fn quoted_whitespace_still_counts() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "q.csv", b"h1,h2\n1,\"2 \"\n");
        let outcome = check(&file);
        assert_eq!(outcome.failure, Some(FailureKind::TrimViolation));
        assert_eq!(outcome.location.and_then(|l| l.column), Some(2));
    }

    #[test]
    fn invalid_utf8_is_parse_failure() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "p.csv", b"h1,h2\ncaf\xe9,2\n");
        let outcome = check(&file);
        assert_eq!(outcome.failure, Some(FailureKind::Parse));
        assert!(outcome.message.contains("NOT compliant with rfc4180"));
    }

    #[test]
    fn text_after_closing_quote_is_parse_failure() {
        let dir = TempDir::new().unwrap();
        let outcome = check(&write(&dir, "s.csv", b"h1,h2\n\"a\"b,2\n"));
        assert_eq!(outcome.failure, Some(FailureKind::Parse));
        assert!(outcome.message.contains("after closing quote"));
    }

    #[test]
    fn quote_opening_mid_field_is_parse_failure() {
        let dir = TempDir::new().unwrap();
        let outcome = check(&write(&dir, "m.csv", b"h1,h2\nab\"c,2\n"));
        assert_eq!(outcome.failure, Some(FailureKind::Parse));
    }

    #[test]
    fn eof_inside_quotes_is_parse_failure() {
        let dir = TempDir::new().unwrap();
        let outcome = check(&write(&dir, "e.csv", b"h1,h2\n1,\"abc"));
        assert_eq!(outcome.failure, Some(FailureKind::Parse));
        assert!(outcome.message.contains("end of file inside quoted field"));

        // A newline before EOF must not turn the open quote into a trim failure
        let outcome = check(&write(&dir, "n.csv", b"h1,h2\n\"abc,2\n"));
        assert_eq!(outcome.failure, Some(FailureKind::Parse));
        assert!(outcome.location.is_none());
    }

    #[test]
    fn blank_line_counts_as_a_data_row() {
        let dir = TempDir::new().unwrap();
        let outcome = check(&write(&dir, "b.csv", b"h1,h2\n\n 1,2\n"));
        assert_eq!(outcome.location.and_then(|l| l.row), Some(2));
    }

    #[test]
    fn header_only_file_passes() {
        let dir = TempDir::new().unwrap();
        assert!(check(&write(&dir, "h.csv", b"h1,h2\n")).is_pass());
    }
}
