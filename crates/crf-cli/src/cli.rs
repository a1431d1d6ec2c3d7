//! CLI argument definitions for the CRF extractor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "crf-extract",
    version,
    about = "Extract structured records from Clinical Research Form PDFs",
    long_about = "Extract structured records from Clinical Research Form PDFs.\n\n\
                  Field labels are located in the recovered document text using a\n\
                  per-form mapping table, checkbox groups are resolved, and the\n\
                  cleaned values are assembled into a nested JSON document."
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

    /// Allow extracted patient values to appear in debug logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Standards directory holding manifest.toml and mapping tables
    /// (default: $CRF_STANDARDS_DIR or the bundled standards/).
    #[arg(long = "standards-dir", value_name = "DIR", global = true)]
    pub standards_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract one CRF document and print it as JSON.
    Extract(ExtractArgs),

    /// Extract every PDF or text document in a folder.
    Batch(BatchArgs),

    /// List the registered form mapping tables.
    Forms,

    /// Verify the standards manifest and mapping table checksums.
    Verify,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Path to the CRF document (.pdf or .txt).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Form mapping table to apply (see `forms`).
    #[arg(long = "form", value_name = "NAME")]
    pub form: String,

    /// Subject identifier written at the reserved subject path.
    #[arg(long = "subject-id", value_name = "ID")]
    pub subject_id: Option<String>,

    /// Scheduled visit date (default: today, MM/DD/YYYY).
    #[arg(long = "scheduled-date", value_name = "DATE")]
    pub scheduled_date: Option<String>,

    /// Set the form-variant flag explicitly instead of detecting it.
    #[arg(long = "variant", value_name = "BOOL")]
    pub variant: Option<bool>,

    /// Write the JSON response to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Print a per-field summary table to stderr.
    #[arg(long = "summary")]
    pub summary: bool,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Folder containing CRF documents.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Form mapping table to apply (see `forms`).
    #[arg(long = "form", value_name = "NAME")]
    pub form: String,

    /// Output directory for JSON files (default: <FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Scheduled visit date for every document (default: today, MM/DD/YYYY).
    #[arg(long = "scheduled-date", value_name = "DATE")]
    pub scheduled_date: Option<String>,

    /// Set the form-variant flag explicitly instead of detecting it.
    #[arg(long = "variant", value_name = "BOOL")]
    pub variant: Option<bool>,
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
