//! CLI command implementations
//!
//! Both commands read a `QueryExpression` from a JSON file and translate
//! it with `N1qlTranslator`. `decode` replays captured result documents
//! through an in-memory connection, so the full execution path runs
//! without a live store.

use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use serde_json::json;

use crate::connection::InMemoryConnection;
use crate::execution::{BridgeConfig, QueryExecution};
use crate::observability::Logger;
use crate::translator::{N1qlTranslator, QueryExpression, Translator};
use crate::types::CanonicalType;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_rows, write_json, write_response};

/// One `--types` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name to check against the translated output, if given
    pub name: Option<String>,
    pub canonical_type: CanonicalType,
}

impl FromStr for ColumnSpec {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, type_name) = match s.rsplit_once(':') {
            Some((name, type_name)) => (Some(name.trim()), type_name),
            None => (None, s),
        };
        if name == Some("") {
            return Err(CliError::invalid_arguments(format!(
                "Empty column name in '{}'",
                s
            )));
        }
        let canonical_type = type_name
            .trim()
            .parse::<CanonicalType>()
            .map_err(|e| CliError::invalid_arguments(e.to_string()))?;

        Ok(Self {
            name: name.map(str::to_string),
            canonical_type,
        })
    }
}

/// Parse CLI arguments and run the command against stdout
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    Logger::set_min_severity(cli.log_level.into());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(cli.command, &mut out)
}

/// Run the appropriate command based on CLI args
pub fn run_command<W: Write>(cmd: Command, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Translate { request } => translate(&request, out),
        Command::Decode {
            request,
            types,
            rows,
            skip_bad_rows,
        } => {
            let columns = types
                .iter()
                .map(|t| t.parse())
                .collect::<CliResult<Vec<ColumnSpec>>>()?;
            decode(&request, &columns, &rows, skip_bad_rows, out)
        }
    }
}

fn load_query(path: &Path) -> CliResult<QueryExpression> {
    let request = read_request(path)?;
    let query = serde_json::from_value(request)?;
    Ok(query)
}

/// Print the query text and output columns of a query expression
///
/// Output: `{"status":"ok","data":{"query":..,"columns":[..]}}`
pub fn translate<W: Write>(request: &Path, out: &mut W) -> CliResult<()> {
    let query = load_query(request)?;
    let translated = N1qlTranslator.translate(&query)?;

    write_response(
        out,
        json!({
            "query": translated.query_text,
            "columns": translated.output_columns,
        }),
    )
}

/// Decode captured result rows through the execution bridge
///
/// Writes each row as a JSON array on its own line, then a summary
/// response. With `skip_bad_rows`, undecodable rows are counted and
/// skipped; otherwise the first one fails the command.
pub fn decode<W: Write>(
    request: &Path,
    columns: &[ColumnSpec],
    rows: &Path,
    skip_bad_rows: bool,
    out: &mut W,
) -> CliResult<()> {
    let query = load_query(request)?;
    let documents = read_rows(rows)?;
    let expected_types: Vec<CanonicalType> = columns.iter().map(|c| c.canonical_type).collect();

    let connection = InMemoryConnection::new().with_default_result(documents);
    let config = if skip_bad_rows {
        BridgeConfig::lenient()
    } else {
        BridgeConfig::default()
    };
    let mut execution =
        QueryExecution::new(N1qlTranslator, query, expected_types, &connection).with_config(config);

    execution.execute()?;

    let names: Vec<String> = execution
        .schema()
        .map(|schema| schema.columns().iter().map(|c| c.name.clone()).collect())
        .unwrap_or_default();
    if let Err(e) = check_names(columns, &names) {
        execution.close();
        return Err(e);
    }

    let mut skipped = 0u64;
    loop {
        match execution.next() {
            Ok(Some(row)) => write_json(out, &row.to_json())?,
            Ok(None) => break,
            Err(e) if skip_bad_rows && e.is_row_error() => skipped += 1,
            Err(e) => {
                execution.close();
                return Err(e.into());
            }
        }
    }
    let decoded = execution.rows_returned();
    execution.close();

    write_response(
        out,
        json!({
            "columns": names,
            "rows": decoded,
            "skipped": skipped,
        }),
    )
}

fn check_names(columns: &[ColumnSpec], names: &[String]) -> CliResult<()> {
    for (index, (column, actual)) in columns.iter().zip(names).enumerate() {
        if let Some(expected) = &column.name {
            if expected != actual {
                return Err(CliError::invalid_arguments(format!(
                    "Column {} is '{}' but --types names '{}'",
                    index + 1,
                    actual,
                    expected
                )));
            }
        }
    }
    Ok(())
}
