//! Column count consistency between consecutive rows.

use csvcheck_ingest::{IngestError, read_record_widths};
use csvcheck_model::{CandidateFile, FailureKind, Location, RuleKind, ValidationOutcome};

/// Index of the first record whose field count differs from the record
/// immediately before it.
pub fn first_width_change(widths: &[usize]) -> Option<usize> {
    widths
        .windows(2)
        .position(|pair| pair[0] != pair[1])
        .map(|index| index + 1)
}

/// Every row must have as many fields as its predecessor. Row 0 is data.
pub fn check(file: &CandidateFile) -> ValidationOutcome {
    let widths = match read_record_widths(file.path()) {
        Ok(widths) => widths,
        Err(error) => return read_failure(file, &error),
    };

    let Some(index) = first_width_change(&widths) else {
        return ValidationOutcome::pass(
            RuleKind::ColumnCountConsistency,
            file.path(),
            format!(
                "{} rows with a consistent column count",
                widths.len()
            ),
        );
    };

    let row = index as u64 + 1;
    ValidationOutcome::fail(
        RuleKind::ColumnCountConsistency,
        file.path(),
        FailureKind::ColumnCountMismatch,
        format!(
            "All rows (see row <{row}> of file <{}>) should have the same number of columns: expected <{}> but found <{}>",
            file.path().display(),
            widths[index - 1],
            widths[index]
        ),
    )
    .at(Location::row(row))
}

fn read_failure(file: &CandidateFile, error: &IngestError) -> ValidationOutcome {
    let kind = match error {
        IngestError::FileRead { .. } => FailureKind::Io,
        _ => FailureKind::Parse,
    };
    ValidationOutcome::fail(
        RuleKind::ColumnCountConsistency,
        file.path(),
        kind,
        error.to_string(),
    )
}
