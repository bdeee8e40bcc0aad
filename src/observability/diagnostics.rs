//! Diagnostics sinks
//!
//! A sink receives the exact query text before it is sent and a structured
//! report for every error an execution surfaces. Sinks sit beside the
//! correctness path: they cannot fail an execution.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::execution::ExecutionError;

use super::events::Event;
use super::scope::ExecutionScope;

/// Receives diagnostics from executions.
///
/// Implementations must be cheap and must not block for long; they are
/// called synchronously from `execute` and `next`.
pub trait DiagnosticsSink: Send + Sync {
    /// Called once per execution with the query text, before the connection call
    fn log_command(&self, execution_id: Uuid, query_text: &str);

    /// Called for every error returned to the caller
    fn report_error(&self, execution_id: Uuid, error: &ExecutionError);
}

/// Writes diagnostics through the structured logger
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerSink;

impl LoggerSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticsSink for LoggerSink {
    fn log_command(&self, execution_id: Uuid, query_text: &str) {
        ExecutionScope::new(execution_id.to_string())
            .emit(Event::QueryIssued, &[("query", query_text)]);
    }

    fn report_error(&self, execution_id: Uuid, error: &ExecutionError) {
        let event = match error {
            ExecutionError::TypeCoercion(_) => Event::RowDecodeFailed,
            _ => Event::ExecutionFailed,
        };
        let message = error.to_string();
        ExecutionScope::new(execution_id.to_string())
            .emit(event, &[("code", error.code()), ("message", message.as_str())]);
    }
}

/// One recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticRecord {
    Command {
        execution_id: Uuid,
        query_text: String,
    },
    Error {
        execution_id: Uuid,
        code: &'static str,
        message: String,
    },
}

impl DiagnosticRecord {
    pub fn execution_id(&self) -> Uuid {
        match self {
            DiagnosticRecord::Command { execution_id, .. }
            | DiagnosticRecord::Error { execution_id, .. } => *execution_id,
        }
    }
}

/// In-memory sink; clones share the same records
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<DiagnosticRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, in arrival order
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.lock().clone()
    }

    /// Query texts passed to `log_command`, in order
    pub fn commands(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|record| match record {
                DiagnosticRecord::Command { query_text, .. } => Some(query_text.clone()),
                DiagnosticRecord::Error { .. } => None,
            })
            .collect()
    }

    /// Error codes passed to `report_error`, in order
    pub fn error_codes(&self) -> Vec<&'static str> {
        self.lock()
            .iter()
            .filter_map(|record| match record {
                DiagnosticRecord::Error { code, .. } => Some(*code),
                DiagnosticRecord::Command { .. } => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DiagnosticRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticsSink for MemorySink {
    fn log_command(&self, execution_id: Uuid, query_text: &str) {
        self.lock().push(DiagnosticRecord::Command {
            execution_id,
            query_text: query_text.to_string(),
        });
    }

    fn report_error(&self, execution_id: Uuid, error: &ExecutionError) {
        self.lock().push(DiagnosticRecord::Error {
            execution_id,
            code: error.code(),
            message: error.to_string(),
        });
    }
}
