//! Content type vs. extension consistency.

use csvcheck_ingest::MimeSniffer;
use csvcheck_model::{CandidateFile, FailureKind, RuleKind, ValidationOutcome};
use tracing::{debug, info};

/// Files that sniff as `text/csv` must carry a `csv` extension (any case;
/// casing is the naming rules' concern). Other content types pass.
pub fn check(file: &CandidateFile, sniffer: &MimeSniffer) -> ValidationOutcome {
    debug!(path = %file.path().display(), "Detecting mime-type");

    let guess = match sniffer.sniff_path(file.path()) {
        Ok(guess) => guess,
        Err(error) => {
            return ValidationOutcome::fail(
                RuleKind::MimeConsistency,
                file.path(),
                FailureKind::Io,
                format!("Could not sniff content type: {error}"),
            );
        }
    };

    if !guess.is_csv() {
        return ValidationOutcome::pass(
            RuleKind::MimeConsistency,
            file.path(),
            format!("Detected <{guess}>"),
        );
    }

    info!(path = %file.path().display(), mime = %guess, "CSV mime-type detected");

    let extension = file.extension();
    if extension.eq_ignore_ascii_case("csv") {
        ValidationOutcome::pass(
            RuleKind::MimeConsistency,
            file.path(),
            format!("Detected <{guess}> with extension <{extension}>"),
        )
    } else {
        ValidationOutcome::fail(
            RuleKind::MimeConsistency,
            file.path(),
            FailureKind::MimeMismatch,
            format!(
                "csv file name extension is not correct: <{}> detected as <{guess}> but has extension <{extension}>",
                file.path().display()
            ),
        )
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
    fn csv_content_under_txt_fails() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "d.txt", b"a,b\n1,2\n3,4\n");
        let outcome = check(&file, &MimeSniffer::new());
        assert!(outcome.is_failure());
        assert_eq!(outcome.failure, Some(FailureKind::MimeMismatch));
        assert!(outcome.message.contains("<txt>"));
        assert!(outcome.message.contains("text/csv"));
    }

    #[test]
    fn uppercase_csv_extension_is_accepted() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "DATA.CSV", b"a,b\n1,2\n");
        assert!(check(&file, &MimeSniffer::new()).is_pass());
    }

    #[test]
    fn non_csv_content_passes_whatever_the_extension() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "notes.md", b"# Title\n\nSome prose.\n");
        let outcome = check(&file, &MimeSniffer::new());
        assert!(outcome.is_pass());
        assert!(outcome.message.contains("text/plain"));
    }

    #[test]
    fn missing_file_is_io_failure() {
        let dir = TempDir::new().unwrap();
        let file = CandidateFile::new(dir.path().join("vanished.txt"));
        let outcome = check(&file, &MimeSniffer::new());
        assert_eq!(outcome.failure, Some(FailureKind::Io));
    }
}
