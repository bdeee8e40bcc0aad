//! ExecutionScope for per-execution event logging
//!
//! Every line logged through a scope carries the scope's fields
//! (the execution id) ahead of the event-specific ones.

use std::time::Instant;

use super::events::Event;
use super::logger::Logger;

/// Carries the fields shared by every log line of one execution
///
/// # Usage
///
/// ```ignore
/// let scope = ExecutionScope::new(&execution_id.to_string());
/// scope.emit(Event::ExecuteBegin, &[]);
/// scope.emit(Event::ExecuteComplete, &[("columns", "2")]);
/// ```
#[derive(Debug, Clone)]
pub struct ExecutionScope {
    execution_id: String,
}

impl ExecutionScope {
    pub fn new(execution_id: impl Into<String>) -> Self {
        Self {
            execution_id: execution_id.into(),
        }
    }

    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    /// Logs `event` at its own severity with the scope fields attached
    pub fn emit(&self, event: Event, extra_fields: &[(&str, &str)]) {
        let fields = self.fields(extra_fields);
        Logger::log(event.severity(), event.as_str(), &fields);
    }

    fn fields<'a>(&'a self, extra_fields: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
        let mut all_fields = Vec::with_capacity(extra_fields.len() + 1);
        all_fields.push(("execution_id", self.execution_id.as_str()));
        all_fields.extend(extra_fields.iter().copied());
        all_fields
    }
}

/// A simple duration timer for logging elapsed time
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_fields_lead_with_execution_id() {
        let scope = ExecutionScope::new("abc");
        let fields = scope.fields(&[("rows", "3")]);
        assert_eq!(fields, vec![("execution_id", "abc"), ("rows", "3")]);
    }

    #[test]
    fn test_emit_does_not_panic() {
        let scope = ExecutionScope::new("abc");
        scope.emit(Event::ExecuteBegin, &[]);
        scope.emit(Event::Closed, &[("rows", "0")]);
    }

    #[test]
    fn test_timer_elapsed() {
        let timer = Timer::new();
        let elapsed: u128 = timer.elapsed_ms().parse().unwrap();
        assert!(elapsed < 10_000);
    }
}
