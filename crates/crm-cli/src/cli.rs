//! Command-line arguments for `crm-import`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use crm_model::EntityType;

#[derive(Parser)]
#[command(
    name = "crm-import",
    version,
    about = "Import CRM records from CSV exports",
    long_about = "Import CRM records from CSV exports.\n\n\
                  Headers are mapped onto destination columns, cell values are\n\
                  sanitized and coerced, and every kept row is inserted in a\n\
                  single batch stamped with the importing user."
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

    /// Include cell values in log output. Off by default because imported
    /// files carry customer data.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import one CSV file into an entity table.
    Import(ImportArgs),

    /// List the importable entity types.
    Entities,

    /// Show the header synonyms recognized for an entity type.
    Mappings(MappingsArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Entity type to import (contacts, companies, deals, ...).
    #[arg(value_name = "ENTITY", value_parser = parse_entity)]
    pub entity: EntityType,

    /// CSV file to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Identity stamped on every imported record.
    #[arg(long = "user-id", value_name = "ID")]
    pub user_id: String,

    /// Directory that receives one JSON-lines file per destination table.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "import-output")]
    pub output_dir: PathBuf,

    /// Run every check but insert nothing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Accept only exact enum members; anything else snaps to the default.
    #[arg(long = "strict-enums")]
    pub strict_enums: bool,

    /// JSON file with import options (limits, enum matching, progress).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON file with extra header mappings per entity type.
    #[arg(long = "mappings", value_name = "FILE")]
    pub mappings: Option<PathBuf>,

    /// Also write the import report as JSON.
    #[arg(long = "report-json", value_name = "FILE")]
    pub report_json: Option<PathBuf>,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct MappingsArgs {
    #[arg(value_name = "ENTITY", value_parser = parse_entity)]
    pub entity: EntityType,

    /// Extra mappings file to merge in before listing.
    #[arg(long = "mappings", value_name = "FILE")]
    pub mappings: Option<PathBuf>,
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

fn parse_entity(value: &str) -> Result<EntityType, String> {
    value.parse().map_err(|err| format!("{err}"))
}
