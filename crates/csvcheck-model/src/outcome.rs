//! Per-file, per-rule validation results.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rule::RuleKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Pass,
    Fail,
    /// Indeterminate result; reported but never fails a rule.
    Advisory,
}

impl OutcomeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Advisory => "Advisory",
        }
    }
}

/// Why an outcome failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Extension or file name is not lowercase.
    NamingViolation,
    /// Content sniffs as CSV but the extension says otherwise.
    MimeMismatch,
    /// Confidently detected charset differs from the required one.
    EncodingMismatch,
    /// A row's field count differs from the previous row.
    ColumnCountMismatch,
    /// A data field carries leading or trailing whitespace.
    TrimViolation,
    /// The file could not be parsed as CSV.
    Parse,
    /// The file could not be opened or read.
    Io,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NamingViolation => "Naming",
            Self::MimeMismatch => "MIME mismatch",
            Self::EncodingMismatch => "Encoding mismatch",
            Self::ColumnCountMismatch => "Column count",
            Self::TrimViolation => "Untrimmed field",
            Self::Parse => "Parse error",
            Self::Io => "I/O error",
        }
    }
}

/// Where in a file a failure was found. Row and column are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u64>,
    /// Physical line in the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    /// Offending raw value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Location {
    pub fn row(row: u64) -> Self {
        Self {
            row: Some(row),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: u64) -> Self {
        self.column = Some(column);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Result of running one rule against one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub rule: RuleKind,
    pub path: PathBuf,
    pub status: OutcomeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl ValidationOutcome {
    pub fn pass(rule: RuleKind, path: &Path, message: impl Into<String>) -> Self {
        Self {
            rule,
            path: path.to_path_buf(),
            status: OutcomeStatus::Pass,
            message: message.into(),
            failure: None,
            location: None,
        }
    }

    pub fn fail(
        rule: RuleKind,
        path: &Path,
        failure: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            path: path.to_path_buf(),
            status: OutcomeStatus::Fail,
            message: message.into(),
            failure: Some(failure),
            location: None,
        }
    }

    pub fn advisory(rule: RuleKind, path: &Path, message: impl Into<String>) -> Self {
        Self {
            rule,
            path: path.to_path_buf(),
            status: OutcomeStatus::Advisory,
            message: message.into(),
            failure: None,
            location: None,
        }
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_pass(&self) -> bool {
        self.status == OutcomeStatus::Pass
    }

    pub fn is_failure(&self) -> bool {
        self.status == OutcomeStatus::Fail
    }

    pub fn is_advisory(&self) -> bool {
        self.status == OutcomeStatus::Advisory
    }
}
