//! Error types for the configuration SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("No global configuration available to use as default")]
    NoDefaultAvailable,

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Timed out: {message}")]
    Timeout { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("gRPC transport error: {message}")]
    Transport { message: String },
}

impl ConfigurationError {
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// `true` for errors a caller can retry after backing off.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_timeouts_and_transport_failures_are_transient() {
        assert!(ConfigurationError::timeout("deadline").is_transient());
        assert!(ConfigurationError::transport("connection reset").is_transient());

        assert!(!ConfigurationError::not_found("client").is_transient());
        assert!(!ConfigurationError::NoDefaultAvailable.is_transient());
        assert!(!ConfigurationError::store("internal store error").is_transient());
        assert!(!ConfigurationError::invalid_argument("client").is_transient());
    }
}
