//! Property tests for charset detection and content sniffing.

use csvcheck_ingest::{CharsetDetector, MimeSniffer};
use csvcheck_model::TEXT_CSV;
use proptest::prelude::*;

fn detect_in_chunks(bytes: &[u8], chunk: usize) -> Option<String> {
    let mut detector = CharsetDetector::new();
    for part in bytes.chunks(chunk.max(1)) {
        if detector.is_done() {
            break;
        }
        detector.feed(part);
    }
    detector.finish().charset
}

proptest! {
    #[test]
    fn ascii_never_yields_a_charset(text in "[ -~\n\r\t]{0,512}") {
        prop_assert_eq!(detect_in_chunks(text.as_bytes(), 4096), None);
    }

    #[test]
    fn non_ascii_utf8_is_detected(prefix in "[a-z,\n]{0,64}", accent in "[éèàüß€]{1,8}") {
        let text = format!("{prefix}{accent}");
        let detected = detect_in_chunks(text.as_bytes(), 4096);
        prop_assert_eq!(detected.as_deref(), Some("UTF-8"));
    }

    #[test]
    fn chunking_does_not_change_result(text in "\\PC{0,256}", chunk in 1usize..16) {
        let whole = detect_in_chunks(text.as_bytes(), text.len().max(1));
        let chunked = detect_in_chunks(text.as_bytes(), chunk);
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn uniform_grids_sniff_as_csv(rows in 2usize..20, cols in 2usize..6) {
        let mut content = String::new();
        for row in 0..rows {
            let line: Vec<String> = (0..cols).map(|col| format!("v{row}_{col}")).collect();
            content.push_str(&line.join(","));
            content.push('\n');
        }
        let guess = MimeSniffer::new().sniff_bytes(content.as_bytes(), false);
        prop_assert_eq!(guess.as_str(), TEXT_CSV);
    }
}

#[test]
fn reused_detector_does_not_leak_state() {
    let mut detector = CharsetDetector::new();
    detector.feed(b"caf\xe9\n");
    assert_eq!(detector.finish().charset(), Some("windows-1252"));

    detector.reset();
    detector.feed(b"plain ascii\n");
    assert_eq!(detector.finish().charset(), None);
}
