//! Property tests for the rule predicates.

use csvcheck_model::CandidateFile;
use csvcheck_validate::checks::{columns, naming, rfc4180};
use proptest::prelude::*;

proptest! {
    #[test]
    fn extension_rule_matches_lowercase_predicate(stem in "[a-z0-9_]{1,12}", ext in "[a-zA-Z]{1,4}") {
        let file = CandidateFile::new(format!("src/{stem}.{ext}"));
        let outcome = naming::check_extension(&file);
        prop_assert_eq!(outcome.is_pass(), ext.to_lowercase() == ext);
    }

    #[test]
    fn filename_rule_matches_lowercase_predicate(name in "[a-zA-Z0-9_]{1,12}\\.[a-zA-Z]{1,4}") {
        let file = CandidateFile::new(format!("src/{name}"));
        let outcome = naming::check_filename(&file);
        prop_assert_eq!(outcome.is_pass(), name.to_lowercase() == name);
    }

    #[test]
    fn width_change_matches_pairwise_predicate(widths in proptest::collection::vec(1usize..5, 0..20)) {
        let consistent = (1..widths.len()).all(|i| widths[i] == widths[i - 1]);
        let change = columns::first_width_change(&widths);
        prop_assert_eq!(change.is_none(), consistent);
        if let Some(index) = change {
            prop_assert!(index > 0);
            prop_assert_ne!(widths[index], widths[index - 1]);
            prop_assert!((1..index).all(|i| widths[i] == widths[i - 1]));
        }
    }

    #[test]
    fn trimmed_values_are_fixed_points(value in "[ \\ta-z]{0,12}") {
        let trimmed = rfc4180::trim_field(&value);
        prop_assert!(rfc4180::is_trimmed(trimmed));
        prop_assert_eq!(rfc4180::is_trimmed(&value), trimmed == value);
    }
}
