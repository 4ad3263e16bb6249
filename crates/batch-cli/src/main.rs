//! Batch file editor CLI.

use batch_cli::logging::{LogConfig, LogFormat, init_logging};
use batch_cli::report::write_error;
use batch_cli::script::Outcome;
use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_edit, run_schema, run_show};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Edit(args) => match run_edit(args) {
            Ok(Outcome::Committed(_) | Outcome::Discarded) => 0,
            Err(error) => {
                report(&error);
                1
            }
        },
        Command::Show(args) => match run_show(args) {
            Ok(()) => 0,
            Err(error) => {
                report(&error);
                1
            }
        },
        Command::Schema => match run_schema() {
            Ok(()) => 0,
            Err(error) => {
                report(&error);
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) {
    tracing::debug!(error = ?error, "Command failed");
    if write_error(&mut io::stderr().lock(), error).is_err() {
        eprintln!("error: {error:#}");
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    // An explicit level on the command line wins over RUST_LOG.
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };

    LogConfig::default()
        .with_level_filter(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_timestamps(cli.log_timestamps)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone())
}
