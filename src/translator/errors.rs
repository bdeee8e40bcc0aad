//! Translation errors

use thiserror::Error;

/// Result type for translation
pub type TranslationResult<T> = Result<T, TranslationError>;

/// The abstract query cannot be expressed in the target query language
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// No keyspace to select from
    #[error("Query has no keyspace")]
    MissingKeyspace,

    /// Nothing projected
    #[error("Query projects no columns")]
    NoColumns,

    /// Two projections produce the same output field
    #[error("Duplicate output column: {0}")]
    DuplicateColumn(String),

    /// Identifier cannot be quoted
    #[error("Invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    /// Construct the target language cannot express
    #[error("Unsupported construct: {0}")]
    Unsupported(String),
}

impl TranslationError {
    pub fn invalid_identifier(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported(what.into())
    }

    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            TranslationError::MissingKeyspace => "BRIDGE_TRANSLATION_NO_KEYSPACE",
            TranslationError::NoColumns => "BRIDGE_TRANSLATION_NO_COLUMNS",
            TranslationError::DuplicateColumn(_) => "BRIDGE_TRANSLATION_DUPLICATE_COLUMN",
            TranslationError::InvalidIdentifier { .. } => "BRIDGE_TRANSLATION_INVALID_IDENTIFIER",
            TranslationError::Unsupported(_) => "BRIDGE_TRANSLATION_UNSUPPORTED",
        }
    }
}
