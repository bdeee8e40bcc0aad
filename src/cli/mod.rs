//! CLI module for docbridge
//!
//! Provides command-line interface for:
//! - translate: Render a query expression as query text
//! - decode: Run captured result rows through the execution bridge

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, LogLevel};
pub use commands::{decode, run, run_command, translate, ColumnSpec};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, read_rows, write_error, write_json, write_response};
