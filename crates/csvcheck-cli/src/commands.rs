use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use csvcheck_model::{RuleKind, ValidationReport};
use csvcheck_validate::{CheckConfig, validate_tree};

use crate::cli::CheckArgs;
use crate::summary::rules_table;

pub fn run_rules() -> Result<()> {
    println!("{}", rules_table());
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<ValidationReport> {
    let config = build_config(args)?;
    let start = Instant::now();
    let report = validate_tree(config).context("validation run")?;
    info!(
        root = %report.root.display(),
        csv_files = report.csv_files,
        failures = report.failure_count(),
        advisories = report.advisory_count(),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    if let Some(path) = &args.report_json {
        write_json_report(&report, path)?;
        info!(path = %path.display(), "wrote JSON report");
    }
    Ok(report)
}

/// Defaults, then the config file, then command-line overrides.
pub fn build_config(args: &CheckArgs) -> Result<CheckConfig> {
    let mut config = match &args.config {
        Some(path) => CheckConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => CheckConfig::default(),
    };
    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    if !args.suffixes.is_empty() {
        config.suffixes = args.suffixes.clone();
    }
    if let Some(encoding) = &args.encoding {
        config.required_encoding = encoding.clone();
    }
    if !args.rules.is_empty() {
        let mut rules = args.rules.clone();
        rules.sort();
        rules.dedup();
        config.rules = Some(rules);
    }
    if args.no_mime_check {
        config.require_csv_mime_matches_extension = false;
        if args.rules.contains(&RuleKind::MimeConsistency) {
            warn!("--no-mime-check disables the explicitly selected mime-consistency rule");
        }
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

pub fn write_json_report(report: &ValidationReport, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create report {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("write report {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush report {}", path.display()))?;
    Ok(())
}

pub fn render_json(report: &ValidationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}
