//! CLI argument definitions for markload.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use markload_ingest::SourceFormat;

#[derive(Parser)]
#[command(
    name = "markload",
    version,
    about = "Bulk importer for school marks, fees, and tests",
    long_about = "Validate and bulk-import mark submissions, fee payments, and test\n\
                  definitions from CSV, JSON, or key:value text files.\n\n\
                  Valid rows are upserted to the backend in fixed-size sequential\n\
                  batches; rows that fail validation are written to a\n\
                  line-addressable error report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow row-level student data in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate an import file and submit the valid rows.
    Import(ImportArgs),

    /// Generate a pre-filled CSV template from a roster.
    Template(TemplateArgs),

    /// List the built-in import profiles.
    Profiles,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the import file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Import profile to validate against.
    #[arg(long, value_enum)]
    pub profile: ProfileArg,

    /// Source format (default: inferred from the file extension).
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Id of the owning entity (test, fee plan, or class).
    #[arg(long, value_name = "ID")]
    pub owner: String,

    /// Cap for the profile's numeric field. Required for marks; optional
    /// for fees (plan total) and tests (max marks cap).
    #[arg(long, value_name = "N")]
    pub max: Option<f64>,

    /// Roster CSV with id,code,name columns (default: fetched from the
    /// backend using --class-id).
    #[arg(long, value_name = "PATH")]
    pub roster: Option<PathBuf>,

    /// Class scope used when fetching the roster from the backend.
    #[arg(long = "class-id", value_name = "ID")]
    pub class_id: Option<String>,

    /// Rows per upsert batch.
    #[arg(long = "chunk-size", value_name = "N", default_value_t = 200)]
    pub chunk_size: usize,

    /// Validate and report without submitting anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Submit the valid rows even when some rows failed validation.
    ///
    /// By default the import refuses to touch the backend while the error
    /// report is non-empty.
    #[arg(long = "allow-partial")]
    pub allow_partial: bool,

    /// Directory for the error report (default: alongside the input file).
    #[arg(long = "error-report", value_name = "DIR")]
    pub error_report: Option<PathBuf>,

    /// Backend base URL (default: $MARKLOAD_BASE_URL).
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Backend API key (default: $MARKLOAD_API_KEY).
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Import profile the template is for.
    #[arg(long, value_enum)]
    pub profile: ProfileArg,

    /// Roster CSV with id,code,name columns.
    #[arg(long, value_name = "PATH")]
    pub roster: PathBuf,

    /// Id of the owning entity, used in the template filename.
    #[arg(long, value_name = "ID")]
    pub owner: String,

    /// Output directory (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

/// Built-in import profile choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    Marks,
    Fees,
    Tests,
}

/// Source format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
    Text,
}

impl From<FormatArg> for SourceFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::Text => Self::Text,
        }
    }
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
