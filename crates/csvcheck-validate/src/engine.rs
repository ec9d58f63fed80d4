//! Rule engine: discovers files once and runs each enabled rule over its
//! file set.
//!
//! Rules run one after another, and files within a rule run in discovery
//! order. Every (rule, file) pair yields exactly one outcome; only discovery
//! failures abort the run.

use csvcheck_ingest::{CharsetDetector, MimeSniffer, list_all_files, list_csv_files};
use csvcheck_model::{
    CandidateFile, OutcomeStatus, RuleKind, RuleReport, ValidationOutcome, ValidationReport,
};
use tracing::{debug, error, info, info_span, warn};

use crate::checks;
use crate::config::CheckConfig;
use crate::error::Result;

#[derive(Debug)]
pub struct Validator {
    config: CheckConfig,
    sniffer: MimeSniffer,
}

impl Validator {
    /// Create a validator after checking the configuration.
    pub fn new(config: CheckConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sniffer: MimeSniffer::default(),
        })
    }

    #[must_use]
    pub fn with_sniffer(mut self, sniffer: MimeSniffer) -> Self {
        self.sniffer = sniffer;
        self
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Discover files under the configured root and run every enabled rule.
    pub fn run(&self) -> Result<ValidationReport> {
        let root = &self.config.root;
        let rules = self.config.enabled_rules();

        let csv_files = list_csv_files(root, &self.config.suffixes)?;
        info!(root = %root.display(), count = csv_files.len(), "Discovered CSV files");

        // The MIME rule looks at every file, not only suffix matches.
        let all_files = if rules.contains(&RuleKind::MimeConsistency) {
            let files = list_all_files(root)?;
            info!(root = %root.display(), count = files.len(), "Discovered files for content sniffing");
            files
        } else {
            Vec::new()
        };

        let mut report = ValidationReport::new(root.clone());
        report.csv_files = csv_files.len();
        report.all_files = all_files.len();

        for rule in rules {
            let files = match rule {
                RuleKind::MimeConsistency => &all_files,
                _ => &csv_files,
            };
            report.rules.push(self.run_rule(rule, files));
        }

        info!(
            passed = report.pass_count(),
            failed = report.failure_count(),
            advisories = report.advisory_count(),
            "Validation complete"
        );
        Ok(report)
    }

    /// Run one rule over `files`, producing one outcome per file.
    pub fn run_rule(&self, rule: RuleKind, files: &[CandidateFile]) -> RuleReport {
        let span = info_span!("rule", rule = rule.name(), code = rule.code());
        let _guard = span.enter();

        let mut report = RuleReport::new(rule);
        // One detector for the rule; the check resets it per file.
        let mut detector = CharsetDetector::new();
        let required = self.config.required_encoding_name();

        for file in files {
            debug!(path = %file.path().display(), "Checking file");
            let outcome = match rule {
                RuleKind::ExtensionCase => checks::naming::check_extension(file),
                RuleKind::FilenameCase => checks::naming::check_filename(file),
                RuleKind::MimeConsistency => checks::mime::check(file, &self.sniffer),
                RuleKind::EncodingConformance => {
                    checks::encoding::check(file, &mut detector, required)
                }
                RuleKind::ColumnCountConsistency => checks::columns::check(file),
                RuleKind::Rfc4180Compliance => checks::rfc4180::check(file),
            };
            log_outcome(&outcome);
            report.push(outcome);
        }

        report
    }
}

fn log_outcome(outcome: &ValidationOutcome) {
    match outcome.status {
        OutcomeStatus::Pass => {
            debug!(path = %outcome.path.display(), message = %outcome.message, "Passed");
        }
        OutcomeStatus::Advisory => {
            warn!(path = %outcome.path.display(), message = %outcome.message, "Advisory");
        }
        OutcomeStatus::Fail => {
            error!(
                path = %outcome.path.display(),
                kind = ?outcome.failure,
                message = %outcome.message,
                "Failed"
            );
        }
    }
}

/// Validate the tree described by `config`.
pub fn validate_tree(config: CheckConfig) -> Result<ValidationReport> {
    Validator::new(config)?.run()
}
