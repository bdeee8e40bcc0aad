//! Observability subsystem for docbridge
//!
//! This module provides:
//! - Structured logging (JSON lines)
//! - Typed lifecycle events for executions
//! - Diagnostics sinks receiving query text and error reports
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. A failing log or sink never fails an execution
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use docbridge::observability::{Event, ExecutionScope, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Info);
//! let scope = ExecutionScope::new("8f0c...");
//! scope.emit(Event::ExecuteBegin, &[]);
//! ```

mod diagnostics;
mod events;
mod logger;
mod scope;

pub use diagnostics::{DiagnosticRecord, DiagnosticsSink, LoggerSink, MemorySink};
pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ExecutionScope, Timer};
