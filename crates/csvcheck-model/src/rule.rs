//! Rule identifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The checks applied to discovered files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    ExtensionCase,
    FilenameCase,
    MimeConsistency,
    EncodingConformance,
    #[serde(rename = "column-count")]
    ColumnCountConsistency,
    #[serde(rename = "rfc4180")]
    Rfc4180Compliance,
}

impl RuleKind {
    /// All rules in execution order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::ExtensionCase,
            Self::FilenameCase,
            Self::MimeConsistency,
            Self::EncodingConformance,
            Self::ColumnCountConsistency,
            Self::Rfc4180Compliance,
        ]
    }

    /// Stable rule code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExtensionCase => "CSV001",
            Self::FilenameCase => "CSV002",
            Self::MimeConsistency => "CSV003",
            Self::EncodingConformance => "CSV004",
            Self::ColumnCountConsistency => "CSV005",
            Self::Rfc4180Compliance => "CSV006",
        }
    }

    /// Kebab-case name accepted on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExtensionCase => "extension-case",
            Self::FilenameCase => "filename-case",
            Self::MimeConsistency => "mime-consistency",
            Self::EncodingConformance => "encoding-conformance",
            Self::ColumnCountConsistency => "column-count",
            Self::Rfc4180Compliance => "rfc4180",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ExtensionCase => "Extension case",
            Self::FilenameCase => "Filename case",
            Self::MimeConsistency => "MIME consistency",
            Self::EncodingConformance => "Encoding conformance",
            Self::ColumnCountConsistency => "Column count",
            Self::Rfc4180Compliance => "RFC4180 compliance",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ExtensionCase => "CSV file extensions must be lowercase (csv, not CSV)",
            Self::FilenameCase => "CSV file names must be entirely lowercase",
            Self::MimeConsistency => "Files whose content sniffs as text/csv must use the csv extension",
            Self::EncodingConformance => "Detected character encoding must match the required encoding",
            Self::ColumnCountConsistency => "Every row must have as many columns as the row before it",
            Self::Rfc4180Compliance => {
                "Files must parse as RFC4180 with a header and no untrimmed data fields"
            }
        }
    }

    /// Whether the rule looks at file content (as opposed to the name only).
    pub fn reads_content(&self) -> bool {
        !matches!(self, Self::ExtensionCase | Self::FilenameCase)
    }

    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|rule| rule.name() == key || rule.code().eq_ignore_ascii_case(&key))
    }
}

impl FromStr for RuleKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ModelError::UnknownRule(s.to_string()))
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
