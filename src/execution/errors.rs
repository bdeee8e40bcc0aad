//! Execution errors
//!
//! Collaborator failures are wrapped, never swallowed:
//! - `Translation` carries the translator's error as-is
//! - `Resource` wraps a transport fault from `execute_query` or the cursor
//! - `TypeCoercion` carries the failing column and representation

use thiserror::Error;

use crate::connection::ResourceError;
use crate::normalizer::TypeCoercionError;
use crate::translator::TranslationError;

use super::state::ExecutionState;

/// Result type for execution operations
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Errors surfaced by `QueryExecution`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The query cannot be expressed in the target language
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// Transport-level failure
    #[error("Query execution failed: {0}")]
    Resource(#[from] ResourceError),

    /// A field could not be read as its expected type
    #[error(transparent)]
    TypeCoercion(#[from] TypeCoercionError),

    /// Translator output columns and expected types differ in length
    #[error("Translated query has {actual} output columns but {expected} types were expected")]
    ColumnCountMismatch { expected: usize, actual: usize },

    /// Operation called out of lifecycle order
    #[error("Cannot {operation} an execution that is {state}")]
    InvalidState {
        operation: &'static str,
        state: ExecutionState,
    },

    /// Execution was cancelled through its token
    #[error("Query execution was cancelled")]
    Cancelled,
}

impl ExecutionError {
    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutionError::Translation(e) => e.code(),
            ExecutionError::Resource(e) => e.code(),
            ExecutionError::TypeCoercion(e) => e.code(),
            ExecutionError::ColumnCountMismatch { .. } => "BRIDGE_COLUMN_COUNT_MISMATCH",
            ExecutionError::InvalidState { .. } => "BRIDGE_INVALID_STATE",
            ExecutionError::Cancelled => "BRIDGE_CANCELLED",
        }
    }

    /// Returns true if the error concerns a single result row
    pub fn is_row_error(&self) -> bool {
        matches!(self, ExecutionError::TypeCoercion(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CanonicalType;

    #[test]
    fn test_resource_error_is_wrapped() {
        let err: ExecutionError = ResourceError::authentication("bad password").into();
        assert_eq!(err.code(), "BRIDGE_RESOURCE_AUTH");
        assert!(err.to_string().starts_with("Query execution failed: "));
        assert!(err.to_string().contains("bad password"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_translation_error_is_transparent() {
        let inner = TranslationError::MissingKeyspace;
        let err: ExecutionError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.code(), inner.code());
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            ExecutionError::ColumnCountMismatch {
                expected: 2,
                actual: 1
            }
            .code(),
            "BRIDGE_COLUMN_COUNT_MISMATCH"
        );
        assert_eq!(ExecutionError::Cancelled.code(), "BRIDGE_CANCELLED");

        let coercion = TypeCoercionError::new(CanonicalType::Integer, "string", "nope");
        let err = ExecutionError::from(coercion);
        assert_eq!(err.code(), "BRIDGE_TYPE_COERCION");
        assert!(err.is_row_error());
    }

    #[test]
    fn test_invalid_state_message() {
        let err = ExecutionError::InvalidState {
            operation: "execute",
            state: ExecutionState::Active,
        };
        assert_eq!(err.to_string(), "Cannot execute an execution that is active");
    }
}
