//! Run configuration.

use std::path::{Path, PathBuf};

use csvcheck_ingest::{canonical_encoding, default_suffixes};
use csvcheck_model::RuleKind;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// What to scan and which rules to apply.
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Directory to scan.
    pub root: PathBuf,
    /// Case-sensitive extensions treated as CSV.
    pub suffixes: Vec<String>,
    /// Charset every CSV file must be in when one can be detected.
    pub required_encoding: String,
    /// Run the content-sniffing rule over all files.
    pub require_csv_mime_matches_extension: bool,
    /// Subset of rules to run; all rules when unset.
    pub rules: Option<Vec<RuleKind>>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src"),
            suffixes: default_suffixes(),
            required_encoding: "UTF-8".to_string(),
            require_csv_mime_matches_extension: true,
            rules: None,
        }
    }
}

impl CheckConfig {
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Loads a TOML config file. A relative `root` is resolved against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ValidationError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        let mut config =
            Self::from_toml_str(&contents).map_err(|source| ValidationError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        if config.root.is_relative()
            && let Some(dir) = path.parent()
        {
            config.root = dir.join(&config.root);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.suffixes.is_empty() || self.suffixes.iter().any(|s| s.trim().is_empty()) {
            return Err(ValidationError::Config(
                "suffixes must contain at least one non-empty extension".to_string(),
            ));
        }
        if canonical_encoding(&self.required_encoding).is_none() {
            return Err(ValidationError::Config(format!(
                "unknown encoding label '{}'",
                self.required_encoding
            )));
        }
        if let Some(rules) = &self.rules
            && rules.is_empty()
        {
            return Err(ValidationError::Config(
                "rules list is empty; omit it to run every rule".to_string(),
            ));
        }
        Ok(())
    }

    /// Rules to run, in execution order, without duplicates.
    pub fn enabled_rules(&self) -> Vec<RuleKind> {
        RuleKind::all()
            .iter()
            .copied()
            .filter(|rule| {
                self.rules
                    .as_ref()
                    .is_none_or(|selected| selected.contains(rule))
            })
            .filter(|rule| {
                *rule != RuleKind::MimeConsistency || self.require_csv_mime_matches_extension
            })
            .collect()
    }

    /// Canonical name of the required encoding ("utf8" becomes "UTF-8").
    pub fn required_encoding_name(&self) -> &str {
        canonical_encoding(&self.required_encoding)
            .map_or(self.required_encoding.as_str(), |encoding| encoding.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = CheckConfig::from_toml_str("").unwrap();
        assert_eq!(config, CheckConfig::default());
        assert_eq!(config.enabled_rules(), RuleKind::all().to_vec());
    }

    #[test]
    fn parses_all_fields() {
        let config = CheckConfig::from_toml_str(
            r#"
root = "data"
suffixes = ["csv"]
required_encoding = "utf8"
require_csv_mime_matches_extension = false
rules = ["rfc4180", "column-count", "mime-consistency"]
"#,
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.root, PathBuf::from("data"));
        assert_eq!(config.required_encoding_name(), "UTF-8");
        // MIME rule dropped by the flag even though it was selected
        assert_eq!(
            config.enabled_rules(),
            vec![
                RuleKind::ColumnCountConsistency,
                RuleKind::Rfc4180Compliance
            ]
        );
    }

    #[test]
    fn rejects_unknown_keys_and_rules() {
        assert!(CheckConfig::from_toml_str("colour = true").is_err());
        assert!(CheckConfig::from_toml_str("rules = [\"bogus\"]").is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let config = CheckConfig {
            suffixes: Vec::new(),
            ..CheckConfig::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::Config(_))));

        let config = CheckConfig {
            required_encoding: "klingon-8".to_string(),
            ..CheckConfig::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::Config(_))));

        let config = CheckConfig {
            rules: Some(Vec::new()),
            ..CheckConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_resolves_root_next_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("csvcheck.toml");
        std::fs::write(&path, "root = \"data\"\n").unwrap();

        let config = CheckConfig::load(&path).unwrap();
        assert_eq!(config.root, dir.path().join("data"));
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("csvcheck.toml");
        std::fs::write(&path, "suffixes = 3\n").unwrap();

        assert!(matches!(
            CheckConfig::load(&path),
            Err(ValidationError::ConfigParse { .. })
        ));
    }
}
