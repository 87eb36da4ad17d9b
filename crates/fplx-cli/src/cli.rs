//! CLI argument definitions for the FamPlex resource checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fplx-check",
    version,
    about = "FamPlex resource checker - verify cross-references between resource tables",
    long_about = "Load the FamPlex resource tables (entities, relations, grounding map,\n\
                  gene prefixes, equivalences, descriptions) and verify that they agree\n\
                  with one another. Exits non-zero when any error is found."
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

    /// Checker configuration (default: <RESOURCES_DIR>/fplx.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every consistency check over the resource tables.
    Check(CheckArgs),

    /// Print the parents and ancestors of a term in the relation hierarchy.
    Lineage(LineageArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Directory holding the resource tables
    /// (default: $FPLX_RESOURCES_DIR, else the current directory).
    #[arg(value_name = "RESOURCES_DIR")]
    pub resources_dir: Option<PathBuf>,

    /// Entity table path (overrides the configured file name).
    #[arg(long = "entities", value_name = "PATH")]
    pub entities: Option<PathBuf>,

    /// Relation table path.
    #[arg(long = "relations", value_name = "PATH")]
    pub relations: Option<PathBuf>,

    /// Grounding map path.
    #[arg(long = "grounding-map", value_name = "PATH")]
    pub grounding_map: Option<PathBuf>,

    /// Gene prefix table path.
    #[arg(long = "gene-prefixes", value_name = "PATH")]
    pub gene_prefixes: Option<PathBuf>,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormatArg,

    /// Write the report to a file instead of stdout.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LineageArgs {
    /// Term to look up, written NAMESPACE:ID (for example FPLX:AKT).
    #[arg(value_name = "NAMESPACE:ID")]
    pub term: String,

    /// Directory holding the resource tables.
    #[arg(value_name = "RESOURCES_DIR")]
    pub resources_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Json,
    Table,
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
