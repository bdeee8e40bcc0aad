//! docbridge CLI entry point
//!
//! Parses arguments, dispatches to the CLI module and, on failure,
//! prints a JSON error response and exits non-zero.

use std::io;

use docbridge::cli;

fn main() {
    if let Err(e) = cli::run() {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if cli::write_error(&mut out, e.code_str(), e.message()).is_err() {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}
