//! Query execution bridge
//!
//! One `QueryExecution` runs one query: translate, issue over a borrowed
//! connection, then decode result documents into rows on demand.
//!
//! # Lifecycle
//!
//! `new` -> `execute` (once) -> `next` until `Ok(None)` -> `close`
//!
//! - `next` returns `Ok(None)` when there is no cursor to read from:
//!   before `execute`, after exhaustion, after a failure and after `close`
//! - Every error ends the execution except a decode error under
//!   `DecodeErrorPolicy::SkipRow`
//! - `close` and `cancel` never fail

use std::sync::Arc;

use uuid::Uuid;

use crate::connection::{CancelToken, Connection, DocumentCursor};
use crate::normalizer::{DefaultNormalizer, ValueNormalizer};
use crate::observability::{DiagnosticsSink, Event, ExecutionScope, LoggerSink, Timer};
use crate::translator::Translator;
use crate::types::{CanonicalType, OutputSchema, Row};

use super::config::BridgeConfig;
use super::decoder::RowDecoder;
use super::errors::{ExecutionError, ExecutionResult};
use super::state::ExecutionState;

/// Cursor ownership by lifecycle phase. Only `Active` holds a cursor;
/// every transition out of it drops the cursor.
enum Phase<K> {
    Unstarted,
    Active(K),
    Exhausted,
    Failed,
    Closed,
}

impl<K> Phase<K> {
    fn state(&self) -> ExecutionState {
        match self {
            Phase::Unstarted => ExecutionState::Unstarted,
            Phase::Active(_) => ExecutionState::Active,
            Phase::Exhausted => ExecutionState::Exhausted,
            Phase::Failed => ExecutionState::Failed,
            Phase::Closed => ExecutionState::Closed,
        }
    }
}

/// Executes one query against a borrowed connection.
///
/// The connection is never closed or mutated by the execution. The
/// cursor it returns is owned here and released on `close`, on failure,
/// on exhaustion and on drop.
pub struct QueryExecution<'c, T, C, N = DefaultNormalizer>
where
    T: Translator,
    C: Connection,
{
    translator: T,
    query: T::Query,
    expected_types: Vec<CanonicalType>,
    connection: &'c C,
    normalizer: N,
    config: BridgeConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
    token: CancelToken,
    execution_id: Uuid,
    scope: ExecutionScope,
    phase: Phase<C::Cursor>,
    decoder: Option<RowDecoder>,
    query_text: Option<String>,
    rows_returned: u64,
}

impl<'c, T, C> QueryExecution<'c, T, C, DefaultNormalizer>
where
    T: Translator,
    C: Connection,
{
    /// Creates an unstarted execution.
    ///
    /// `expected_types` must line up positionally with the columns the
    /// translator produces for `query`; this is checked by `execute`.
    pub fn new(
        translator: T,
        query: T::Query,
        expected_types: impl Into<Vec<CanonicalType>>,
        connection: &'c C,
    ) -> Self {
        let execution_id = Uuid::new_v4();
        Self {
            translator,
            query,
            expected_types: expected_types.into(),
            connection,
            normalizer: DefaultNormalizer,
            config: BridgeConfig::default(),
            diagnostics: Arc::new(LoggerSink),
            token: CancelToken::new(),
            execution_id,
            scope: ExecutionScope::new(execution_id.to_string()),
            phase: Phase::Unstarted,
            decoder: None,
            query_text: None,
            rows_returned: 0,
        }
    }
}

impl<'c, T, C, N> QueryExecution<'c, T, C, N>
where
    T: Translator,
    C: Connection,
    N: ValueNormalizer,
{
    /// Replaces the value normalizer
    pub fn with_normalizer<M: ValueNormalizer>(self, normalizer: M) -> QueryExecution<'c, T, C, M> {
        QueryExecution {
            translator: self.translator,
            query: self.query,
            expected_types: self.expected_types,
            connection: self.connection,
            normalizer,
            config: self.config,
            diagnostics: self.diagnostics,
            token: self.token,
            execution_id: self.execution_id,
            scope: self.scope,
            phase: self.phase,
            decoder: self.decoder,
            query_text: self.query_text,
            rows_returned: self.rows_returned,
        }
    }

    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the diagnostics sink (default: `LoggerSink`)
    pub fn with_diagnostics<S: DiagnosticsSink + 'static>(mut self, sink: S) -> Self {
        self.diagnostics = Arc::new(sink);
        self
    }

    /// Uses an existing token, so cancellation can be requested before
    /// the execution is built
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    // ==================
    // Lifecycle
    // ==================

    /// Translates the query and issues it over the connection.
    ///
    /// The query text goes to the diagnostics sink before the connection
    /// is called. Only valid once, from `Unstarted`.
    pub fn execute(&mut self) -> ExecutionResult<()> {
        let state = self.state();
        if state != ExecutionState::Unstarted {
            let err = ExecutionError::InvalidState {
                operation: "execute",
                state,
            };
            self.diagnostics.report_error(self.execution_id, &err);
            return Err(err);
        }

        let timer = Timer::new();
        let expected = self.expected_types.len().to_string();
        self.scope.emit(Event::ExecuteBegin, &[("columns", expected.as_str())]);

        match self.open_cursor() {
            Ok(cursor) => {
                self.phase = Phase::Active(cursor);
                let elapsed_ms = timer.elapsed_ms();
                self.scope.emit(
                    Event::ExecuteComplete,
                    &[("columns", expected.as_str()), ("elapsed_ms", elapsed_ms.as_str())],
                );
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn open_cursor(&mut self) -> ExecutionResult<C::Cursor> {
        let translated = self.translator.translate(&self.query)?;

        let schema = OutputSchema::zip(&translated.output_columns, &self.expected_types).ok_or(
            ExecutionError::ColumnCountMismatch {
                expected: self.expected_types.len(),
                actual: translated.output_columns.len(),
            },
        )?;
        self.decoder = Some(RowDecoder::new(schema).verify(self.config.verify_rows));
        self.query_text = Some(translated.query_text.clone());

        if self.token.is_cancelled() {
            return Err(ExecutionError::Cancelled);
        }

        self.diagnostics
            .log_command(self.execution_id, &translated.query_text);
        let cursor = self
            .connection
            .execute_query(&translated.query_text, &self.token)?;

        if self.token.is_cancelled() {
            drop(cursor);
            return Err(ExecutionError::Cancelled);
        }
        Ok(cursor)
    }

    /// Returns the next decoded row, or `Ok(None)` at end of stream.
    ///
    /// After end of stream every later call returns `Ok(None)` too.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> ExecutionResult<Option<Row>> {
        self.advance()
    }

    fn advance(&mut self) -> ExecutionResult<Option<Row>> {
        if !matches!(self.phase, Phase::Active(_)) {
            return Ok(None);
        }
        if self.token.is_cancelled() {
            return Err(self.fail(ExecutionError::Cancelled));
        }

        let fetched = match &mut self.phase {
            Phase::Active(cursor) => cursor.next_document(),
            _ => return Ok(None),
        };
        let doc = match fetched {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                self.phase = Phase::Exhausted;
                let rows = self.rows_returned.to_string();
                self.scope.emit(Event::CursorExhausted, &[("rows", rows.as_str())]);
                return Ok(None);
            }
            Err(fault) => return Err(self.fail(fault.into())),
        };

        let decoded = match &self.decoder {
            Some(decoder) => decoder.decode(&doc, &self.normalizer),
            None => return Ok(None),
        };
        match decoded {
            Ok(row) => {
                self.rows_returned += 1;
                Ok(Some(row))
            }
            Err(coercion) => {
                let err = ExecutionError::from(coercion);
                if self.config.aborts_on_decode_error() {
                    Err(self.fail(err))
                } else {
                    self.diagnostics.report_error(self.execution_id, &err);
                    Err(err)
                }
            }
        }
    }

    /// Releases the cursor. Idempotent; never fails.
    pub fn close(&mut self) {
        if matches!(self.phase, Phase::Closed) {
            return;
        }
        self.phase = Phase::Closed;
        let rows = self.rows_returned.to_string();
        self.scope.emit(Event::Closed, &[("rows", rows.as_str())]);
    }

    /// Requests cancellation. Best-effort; never fails.
    ///
    /// Sets the execution's token and, unless the execution is already
    /// terminal, forwards to the connection. An `execute` in flight returns
    /// `Cancelled` once the connection call returns; an active execution
    /// returns `Cancelled` from the next `next`. A cancelled execution
    /// still accepts `close`.
    pub fn cancel(&self) {
        let state = self.state();
        self.scope
            .emit(Event::CancelRequested, &[("state", state.as_str())]);
        self.token.cancel();
        if !state.is_terminal() {
            self.connection.cancel();
        }
    }

    /// Drops the cursor and records the failure
    fn fail(&mut self, err: ExecutionError) -> ExecutionError {
        self.phase = Phase::Failed;
        self.diagnostics.report_error(self.execution_id, &err);
        err
    }

    // ==================
    // Accessors
    // ==================

    pub fn state(&self) -> ExecutionState {
        self.phase.state()
    }

    /// Output schema, available once translation succeeded
    pub fn schema(&self) -> Option<&OutputSchema> {
        self.decoder.as_ref().map(RowDecoder::schema)
    }

    /// Query text sent (or about to be sent) to the connection
    pub fn query_text(&self) -> Option<&str> {
        self.query_text.as_deref()
    }

    /// Rows successfully decoded so far
    pub fn rows_returned(&self) -> u64 {
        self.rows_returned
    }

    pub fn execution_id(&self) -> Uuid {
        self.execution_id
    }

    /// A handle that cancels this execution from another thread
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn expected_types(&self) -> &[CanonicalType] {
        &self.expected_types
    }
}

impl<T, C, N> Iterator for QueryExecution<'_, T, C, N>
where
    T: Translator,
    C: Connection,
    N: ValueNormalizer,
{
    type Item = ExecutionResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}
