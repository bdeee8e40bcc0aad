//! Observable events of an execution

use std::fmt;

use super::logger::Severity;

/// Events emitted over the lifetime of one execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// `execute` called
    ExecuteBegin,
    /// Query text about to be sent
    QueryIssued,
    /// Cursor obtained, execution active
    ExecuteComplete,
    /// Any failure surfaced to the caller
    ExecutionFailed,
    /// A result document could not be decoded
    RowDecodeFailed,
    /// Cursor returned its last document
    CursorExhausted,
    /// `cancel` called
    CancelRequested,
    /// `close` released the execution
    Closed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ExecuteBegin => "BRIDGE_EXECUTE_BEGIN",
            Event::QueryIssued => "BRIDGE_QUERY_ISSUED",
            Event::ExecuteComplete => "BRIDGE_EXECUTE_COMPLETE",
            Event::ExecutionFailed => "BRIDGE_EXECUTE_FAILED",
            Event::RowDecodeFailed => "BRIDGE_ROW_DECODE_FAILED",
            Event::CursorExhausted => "BRIDGE_CURSOR_EXHAUSTED",
            Event::CancelRequested => "BRIDGE_CANCEL_REQUESTED",
            Event::Closed => "BRIDGE_CLOSED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryIssued => Severity::Trace,
            Event::ExecutionFailed | Event::RowDecodeFailed => Severity::Error,
            Event::CancelRequested => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
