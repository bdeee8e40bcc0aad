//! Document access errors

use thiserror::Error;

/// Result type for document access
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised by typed document accessors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Field is present with a JSON kind the accessor cannot read
    #[error("Field '{field}' expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Numeric field cannot be narrowed without loss
    #[error("Field '{field}' value {value} does not fit {target}")]
    OutOfRange {
        field: String,
        target: &'static str,
        value: String,
    },

    /// Result row is not a JSON object
    #[error("Result row is not a JSON object (found {found})")]
    NotAnObject { found: &'static str },
}

impl DocumentError {
    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            DocumentError::TypeMismatch { .. } => "BRIDGE_FIELD_TYPE_MISMATCH",
            DocumentError::OutOfRange { .. } => "BRIDGE_FIELD_OUT_OF_RANGE",
            DocumentError::NotAnObject { .. } => "BRIDGE_ROW_NOT_OBJECT",
        }
    }
}
