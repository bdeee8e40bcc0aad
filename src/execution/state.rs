//! Execution lifecycle states

use std::fmt;

/// Lifecycle state of a `QueryExecution`
///
/// ```text
/// Unstarted --execute--> Active --next (end)--> Exhausted
///     |                    |
///     +--(error)--> Failed <+--(fault, cancel, decode error)
///
/// any --close--> Closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionState {
    /// Created, `execute` not yet called
    Unstarted,
    /// Cursor open, rows may remain
    Active,
    /// Cursor returned its last document
    Exhausted,
    /// An error ended the execution; no cursor is held
    Failed,
    /// Released by `close`
    Closed,
}

impl ExecutionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionState::Unstarted => "unstarted",
            ExecutionState::Active => "active",
            ExecutionState::Exhausted => "exhausted",
            ExecutionState::Failed => "failed",
            ExecutionState::Closed => "closed",
        }
    }

    /// Returns true if no further rows can be produced
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionState::Exhausted | ExecutionState::Failed | ExecutionState::Closed
        )
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
