//! CLI argument definitions using clap
//!
//! Commands:
//! - docbridge translate --request <query.json>
//! - docbridge decode --request <query.json> --types <name:type,...> --rows <rows.jsonl>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::observability::Severity;

/// docbridge - Typed rows from document store queries
#[derive(Parser, Debug)]
#[command(name = "docbridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum severity of log lines
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Error)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the query text and output columns for a query expression
    Translate {
        /// Path to a JSON query expression
        #[arg(long)]
        request: PathBuf,
    },

    /// Decode captured result rows through the execution bridge
    Decode {
        /// Path to a JSON query expression
        #[arg(long)]
        request: PathBuf,

        /// Expected column types in output order, as `type` or `name:type`
        #[arg(long, value_delimiter = ',', required = true)]
        types: Vec<String>,

        /// Path to result documents, one JSON object per line
        #[arg(long)]
        rows: PathBuf,

        /// Report undecodable rows and continue instead of aborting
        #[arg(long)]
        skip_bad_rows: bool,
    },
}

/// Log level accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Severity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Severity::Trace,
            LogLevel::Info => Severity::Info,
            LogLevel::Warn => Severity::Warn,
            LogLevel::Error => Severity::Error,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
