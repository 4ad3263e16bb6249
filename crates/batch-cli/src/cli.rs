//! CLI argument definitions for the batch file editor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "batch-editor",
    version,
    about = "Edit batch files of component sets, file sets and files",
    long_about = "Create or edit hierarchical XML batch files.\n\n\
                  Entries are edited through cascaded lists: selecting a component set\n\
                  lists its file sets, selecting a file set lists its files."
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

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open a batch file and edit it with line-based commands.
    Edit(EditArgs),

    /// Print the contents of a batch file.
    Show(ShowArgs),

    /// Print the default batch schema as TOML.
    Schema,
}

#[derive(Parser)]
pub struct EditArgs {
    /// Batch file to open (or create with --new).
    #[arg(value_name = "BATCH_FILE")]
    pub path: PathBuf,

    /// Start a new, empty batch file instead of loading one.
    #[arg(long = "new")]
    pub new: bool,

    /// Schema file describing the root tag and tiers.
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Read commands from a file instead of stdin.
    ///
    /// Reaching the end of the commands without `commit` discards all edits.
    #[arg(long = "script", value_name = "FILE")]
    pub script: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Batch file to print.
    #[arg(value_name = "BATCH_FILE")]
    pub path: PathBuf,

    /// Schema file describing the root tag and tiers.
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "tree")]
    pub format: ShowFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShowFormatArg {
    Tree,
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
