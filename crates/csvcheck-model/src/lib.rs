pub mod document;
pub mod error;
pub mod file;
pub mod guess;
pub mod outcome;
pub mod report;
pub mod rule;

pub use document::{CsvDocument, Record};
pub use error::{ModelError, Result};
pub use file::CandidateFile;
pub use guess::{EncodingGuess, MimeGuess, TEXT_CSV};
pub use outcome::{FailureKind, Location, OutcomeStatus, ValidationOutcome};
pub use report::{RuleReport, ValidationReport};
pub use rule::RuleKind;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn report_counts() {
        let path = Path::new("src/a.csv");
        let mut encoding = RuleReport::new(RuleKind::EncodingConformance);
        encoding.push(ValidationOutcome::pass(
            RuleKind::EncodingConformance,
            path,
            "UTF-8",
        ));
        encoding.push(ValidationOutcome::advisory(
            RuleKind::EncodingConformance,
            path,
            "no charset detected",
        ));
        let mut columns = RuleReport::new(RuleKind::ColumnCountConsistency);
        columns.push(ValidationOutcome::fail(
            RuleKind::ColumnCountConsistency,
            path,
            FailureKind::ColumnCountMismatch,
            "row 3",
        ));

        let report = ValidationReport {
            root: "src".into(),
            csv_files: 1,
            all_files: 0,
            rules: vec![encoding, columns],
        };
        assert_eq!(report.pass_count(), 1);
        assert_eq!(report.advisory_count(), 1);
        assert_eq!(report.failure_count(), 1);
        assert!(report.has_failures());
        assert!(
            !report
                .rule(RuleKind::EncodingConformance)
                .expect("encoding report")
                .has_failures()
        );
    }

    #[test]
    fn outcome_serializes() {
        let outcome = ValidationOutcome::fail(
            RuleKind::Rfc4180Compliance,
            Path::new("src/b.csv"),
            FailureKind::TrimViolation,
            "untrimmed",
        )
        .at(Location::row(1).with_column(1).with_value(" 1"));
        let json = serde_json::to_string(&outcome).expect("serialize outcome");
        let round: ValidationOutcome = serde_json::from_str(&json).expect("deserialize outcome");
        assert_eq!(round, outcome);
        assert!(json.contains("\"rfc4180\""));
        assert!(json.contains("\"trim_violation\""));
    }
}
