//! Transport-level errors

use std::fmt;

use thiserror::Error;

/// Result type for connection operations
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Category of a transport fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceErrorKind {
    /// Could not reach or hold the connection
    Connection,
    /// Network failure mid-request
    Network,
    /// Credentials rejected
    Authentication,
    /// Transport gave up waiting
    Timeout,
    /// Store answered with something unreadable
    Protocol,
}

impl ResourceErrorKind {
    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            ResourceErrorKind::Connection => "BRIDGE_RESOURCE_CONNECTION",
            ResourceErrorKind::Network => "BRIDGE_RESOURCE_NETWORK",
            ResourceErrorKind::Authentication => "BRIDGE_RESOURCE_AUTH",
            ResourceErrorKind::Timeout => "BRIDGE_RESOURCE_TIMEOUT",
            ResourceErrorKind::Protocol => "BRIDGE_RESOURCE_PROTOCOL",
        }
    }
}

impl fmt::Display for ResourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceErrorKind::Connection => "connection",
            ResourceErrorKind::Network => "network",
            ResourceErrorKind::Authentication => "authentication",
            ResourceErrorKind::Timeout => "timeout",
            ResourceErrorKind::Protocol => "protocol",
        };
        write!(f, "{}", name)
    }
}

/// Connection, network or authentication failure signalled by the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failure: {message}")]
pub struct ResourceError {
    kind: ResourceErrorKind,
    message: String,
}

impl ResourceError {
    pub fn new(kind: ResourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ResourceErrorKind::Connection, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ResourceErrorKind::Network, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ResourceErrorKind::Authentication, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ResourceErrorKind::Timeout, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ResourceErrorKind::Protocol, message)
    }

    /// Returns the fault category
    pub fn kind(&self) -> ResourceErrorKind {
        self.kind
    }

    /// Returns the transport's message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ResourceError::authentication("bad password for user 'etl'");
        assert_eq!(
            err.to_string(),
            "authentication failure: bad password for user 'etl'"
        );
        assert_eq!(err.kind(), ResourceErrorKind::Authentication);
        assert_eq!(err.code(), "BRIDGE_RESOURCE_AUTH");
    }
}
