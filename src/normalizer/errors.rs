//! Type coercion errors

use std::fmt;

use crate::document::DocumentError;
use crate::types::CanonicalType;

/// Result type for coercion
pub type CoercionResult<T> = Result<T, TypeCoercionError>;

/// A field's representation is incompatible with its expected type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCoercionError {
    /// Output column, once known
    column: Option<String>,
    /// Requested canonical type
    target: CanonicalType,
    /// Representation actually found
    found: String,
    /// Human-readable reason
    detail: String,
}

impl TypeCoercionError {
    pub fn new(target: CanonicalType, found: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            column: None,
            target,
            found: found.into(),
            detail: detail.into(),
        }
    }

    /// Wraps a typed accessor failure
    pub fn from_access(err: DocumentError, target: CanonicalType) -> Self {
        let (column, found) = match &err {
            DocumentError::TypeMismatch { field, found, .. } => (Some(field.clone()), *found),
            DocumentError::OutOfRange { field, .. } => (Some(field.clone()), "number"),
            DocumentError::NotAnObject { found } => (None, *found),
        };
        Self {
            column,
            target,
            found: found.to_string(),
            detail: err.to_string(),
        }
    }

    /// Attaches the output column name
    pub fn for_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn target(&self) -> CanonicalType {
        self.target
    }

    pub fn found(&self) -> &str {
        &self.found
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Returns the error code
    pub fn code(&self) -> &'static str {
        "BRIDGE_TYPE_COERCION"
    }
}

impl fmt::Display for TypeCoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot read {} as {}", self.found, self.target)?;
        if let Some(column) = &self.column {
            write!(f, " in column '{}'", column)?;
        }
        write!(f, ": {}", self.detail)
    }
}

impl std::error::Error for TypeCoercionError {}
