//! CLI argument definitions for csvcheck.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use csvcheck_model::RuleKind;

#[derive(Parser)]
#[command(
    name = "csvcheck",
    version,
    about = "Validate a tree of CSV files against naming, encoding, and RFC4180 conventions",
    long_about = "Validate a tree of CSV files against naming, encoding, and structural conventions.\n\n\
                  Checks lowercase extensions and file names, content-type vs. extension,\n\
                  UTF-8 encoding, consistent column counts, and RFC4180 field trimming."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate every file under a root directory.
    Check(CheckArgs),

    /// List the available rules.
    Rules,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Directory to scan (default: the config file's root, else ./src).
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extension treated as CSV, case-sensitive (repeatable; default: csv, CSV).
    #[arg(long = "suffix", value_name = "EXT")]
    pub suffixes: Vec<String>,

    /// Required character encoding (default: UTF-8).
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Run only this rule (repeatable; see `csvcheck rules`).
    #[arg(long = "rule", value_name = "RULE")]
    pub rules: Vec<RuleKind>,

    /// Skip the content-type vs. extension check.
    #[arg(long = "no-mime-check")]
    pub no_mime_check: bool,

    /// Also write the full report as JSON to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Output format for stdout.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
