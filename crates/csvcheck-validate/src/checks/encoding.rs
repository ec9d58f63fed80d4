//! Character encoding conformance.

use csvcheck_ingest::{CharsetDetector, detect_reader, same_encoding};
use csvcheck_model::{CandidateFile, FailureKind, RuleKind, ValidationOutcome};
use tracing::{debug, info, warn};

/// Streams the file through `detector` and compares the detected charset
/// with `required`. An undecided detector yields an advisory, not a failure.
///
/// The detector is reset before use, so one instance can serve a whole file
/// set without carrying state between files.
pub fn check(
    file: &CandidateFile,
    detector: &mut CharsetDetector,
    required: &str,
) -> ValidationOutcome {
    debug!(path = %file.path().display(), "Detecting character encoding");
    detector.reset();

    let guess = match file.open().and_then(|reader| detect_reader(reader, detector)) {
        Ok(guess) => guess,
        Err(error) => {
            return ValidationOutcome::fail(
                RuleKind::EncodingConformance,
                file.path(),
                FailureKind::Io,
                format!("Could not read <{}>: {error}", file.path().display()),
            );
        }
    };

    let Some(charset) = guess.charset() else {
        warn!(
            path = %file.path().display(),
            "No encoding could be detected"
        );
        return ValidationOutcome::advisory(
            RuleKind::EncodingConformance,
            file.path(),
            format!(
                "No encoding could be detected on <{}>",
                file.path().display()
            ),
        );
    };

    info!(path = %file.path().display(), encoding = charset, "Detected encoding");

    if same_encoding(charset, required) {
        ValidationOutcome::pass(
            RuleKind::EncodingConformance,
            file.path(),
            format!("Detected <{charset}>"),
        )
    } else {
        ValidationOutcome::fail(
            RuleKind::EncodingConformance,
            file.path(),
            FailureKind::EncodingMismatch,
            format!(
                "File encoding of <{}> is not the expected one: expected <{required}> but detected <{charset}>",
                file.path().display()
            ),
        )
    }
}
