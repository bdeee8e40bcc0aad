//! CLI-specific error types

use std::fmt;
use std::io;

use crate::execution::ExecutionError;
use crate::translator::TranslationError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Bad command line value
    InvalidArguments,
    /// Request or rows file could not be parsed
    InvalidInput,
    /// I/O error (files, stdout)
    IoError,
    /// Translation or execution failure, with the bridge's own code
    Execution(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments => "BRIDGE_CLI_INVALID_ARGUMENTS",
            Self::InvalidInput => "BRIDGE_CLI_INVALID_INPUT",
            Self::IoError => "BRIDGE_CLI_IO_ERROR",
            Self::Execution(code) => *code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArguments, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON error: {}", e))
    }
}

impl From<ExecutionError> for CliError {
    fn from(e: ExecutionError) -> Self {
        Self::new(CliErrorCode::Execution(e.code()), e.to_string())
    }
}

impl From<TranslationError> for CliError {
    fn from(e: TranslationError) -> Self {
        ExecutionError::from(e).into()
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ResourceError;

    #[test]
    fn test_execution_code_is_kept() {
        let err = CliError::from(ExecutionError::Resource(ResourceError::network("reset")));
        assert_eq!(err.code_str(), "BRIDGE_RESOURCE_NETWORK");
        assert!(err.message().contains("reset"));
    }

    #[test]
    fn test_display() {
        let err = CliError::invalid_arguments("unknown type 'intger'");
        assert_eq!(
            err.to_string(),
            "BRIDGE_CLI_INVALID_ARGUMENTS: unknown type 'intger'"
        );
    }
}
