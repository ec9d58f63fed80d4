//! File name casing rules. Only the name is inspected, never the content.

use csvcheck_model::{CandidateFile, FailureKind, RuleKind, ValidationOutcome};

/// Extension must already be lowercase (`csv`, not `CSV`).
pub fn check_extension(file: &CandidateFile) -> ValidationOutcome {
    let extension = file.extension();
    let lower = extension.to_lowercase();
    if lower == extension {
        return ValidationOutcome::pass(
            RuleKind::ExtensionCase,
            file.path(),
            format!("Extension <{extension}> is lowercase"),
        );
    }
    ValidationOutcome::fail(
        RuleKind::ExtensionCase,
        file.path(),
        FailureKind::NamingViolation,
        format!(
            "Extension should only be <{lower}> not <{extension}> or any other: <{}>",
            file.path().display()
        ),
    )
}

/// Whole file name must already be lowercase.
pub fn check_filename(file: &CandidateFile) -> ValidationOutcome {
    let name = file.file_name();
    let lower = name.to_lowercase();
    if lower == name {
        return ValidationOutcome::pass(
            RuleKind::FilenameCase,
            file.path(),
            format!("Filename <{name}> is lowercase"),
        );
    }
    ValidationOutcome::fail(
        RuleKind::FilenameCase,
        file.path(),
        FailureKind::NamingViolation,
        format!(
            "Filename should only be lowercase: <{name}> (expected <{lower}>) in <{}>",
            file.path().display()
        ),
    )
}
