//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised by an RPC transport.
///
/// These describe failures of the channel itself (unreachable endpoint,
/// broken stream, non-OK RPC status). Server-reported GQL outcomes travel
/// inside response messages as [`super::GqlStatus`] and are never mapped
/// to this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Channel could not be established
    #[error("Connect error: {0}")]
    Connect(String),

    /// Endpoint is currently unavailable
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// The RPC completed with a non-OK status
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// RPC status code name
        code: String,
        /// Status detail
        message: String,
    },

    /// A server stream broke after it started
    #[error("Stream error: {0}")]
    Stream(String),

    /// Malformed or unexpected message
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Deadline exceeded at the transport level
    #[error("Transport deadline exceeded")]
    Timeout,

    /// Channel already shut down
    #[error("Transport closed")]
    Closed,
}

impl TransportError {
    /// Create an RPC status error.
    pub fn rpc(code: impl Into<String>, message: impl Into<String>) -> Self {
        TransportError::Rpc {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a stream interruption error.
    pub fn stream(message: impl Into<String>) -> Self {
        TransportError::Stream(message.into())
    }

    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TransportError::Unavailable(_) | TransportError::Stream(_) | TransportError::Timeout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TransportError::rpc("UNAVAILABLE", "connection reset");
        assert_eq!(err.to_string(), "RPC error UNAVAILABLE: connection reset");
        assert_eq!(TransportError::Closed.to_string(), "Transport closed");
        assert_eq!(
            TransportError::Connect("refused".into()).to_string(),
            "Connect error: refused"
        );
        assert_eq!(TransportError::Timeout.to_string(), "Transport deadline exceeded");

        let boxed: Box<dyn std::error::Error> = Box::new(TransportError::stream("reset"));
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_transient() {
        assert!(TransportError::Timeout.is_transient());
        assert!(TransportError::stream("reset").is_transient());
        assert!(!TransportError::Closed.is_transient());
        assert!(!TransportError::rpc("INVALID_ARGUMENT", "bad").is_transient());
    }
}
