use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::outcome::{OutcomeStatus, ValidationOutcome};
use crate::rule::RuleKind;

/// Outcomes of one rule across its file set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReport {
    pub rule: RuleKind,
    pub outcomes: Vec<ValidationOutcome>,
}

impl RuleReport {
    pub fn new(rule: RuleKind) -> Self {
        Self {
            rule,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: ValidationOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn files_checked(&self) -> usize {
        self.outcomes.len()
    }

    pub fn pass_count(&self) -> usize {
        self.count(OutcomeStatus::Pass)
    }

    pub fn failure_count(&self) -> usize {
        self.count(OutcomeStatus::Fail)
    }

    pub fn advisory_count(&self) -> usize {
        self.count(OutcomeStatus::Advisory)
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failure())
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == status)
            .count()
    }
}

/// Everything a validation run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub root: PathBuf,
    /// Number of suffix-matched CSV files.
    pub csv_files: usize,
    /// Number of files seen by the unfiltered scan (0 when it did not run).
    pub all_files: usize,
    pub rules: Vec<RuleReport>,
}

impl ValidationReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            csv_files: 0,
            all_files: 0,
            rules: Vec::new(),
        }
    }

    pub fn rule(&self, rule: RuleKind) -> Option<&RuleReport> {
        self.rules.iter().find(|report| report.rule == rule)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.rules.iter().flat_map(|report| report.outcomes.iter())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.outcomes().filter(|outcome| outcome.is_failure())
    }

    pub fn pass_count(&self) -> usize {
        self.rules.iter().map(RuleReport::pass_count).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.rules.iter().map(RuleReport::failure_count).sum()
    }

    pub fn advisory_count(&self) -> usize {
        self.rules.iter().map(RuleReport::advisory_count).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }
}
