//! csvcheck CLI.

use clap::{ColorChoice, Parser};
use csvcheck_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg};
use csvcheck_cli::commands::{render_json, run_check, run_rules};
use csvcheck_cli::logging::{LogConfig, LogFormat, init_logging};
use csvcheck_cli::summary::print_summary;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

const EXIT_OK: i32 = 0;
const EXIT_FAILURES: i32 = 1;
const EXIT_FATAL: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FATAL);
    }
    let exit_code = match cli.command {
        Command::Check(args) => match run_check(&args) {
            Ok(report) => {
                match args.format {
                    OutputFormatArg::Table => print_summary(&report),
                    OutputFormatArg::Json => match render_json(&report) {
                        Ok(json) => println!("{json}"),
                        Err(error) => {
                            eprintln!("error: {error:#}");
                            std::process::exit(EXIT_FATAL);
                        }
                    },
                }
                if report.has_failures() {
                    EXIT_FAILURES
                } else {
                    EXIT_OK
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_FATAL
            }
        },
        Command::Rules => match run_rules() {
            Ok(()) => EXIT_OK,
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_FATAL
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
