//! Error types for the product catalog client.
//!
//! # Design
//! The `Display` output of every server-facing variant is exactly the
//! human-readable message, so the controller can store `err.to_string()`
//! as the error shown to the user. When the server supplies `{ "error": .. }`
//! that text is used verbatim; otherwise a per-operation fallback.

use thiserror::Error;

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by `ProductClient` build and parse methods.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Transport failure (`status` is `None`) or a non-2xx list response.
    #[error("{message}")]
    Network { status: Option<u16>, message: String },

    /// Input rejected, either by the presence check or by a 4xx response.
    #[error("{0}")]
    Validation(String),

    /// The server returned 404.
    #[error("{0}")]
    NotFound(String),

    /// The server returned a 5xx (or any other unexpected) status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A success response body could not be decoded.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Shorthand for a transport-level failure with no HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Network {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network { status, .. } => *status,
            ApiError::NotFound(_) => Some(404),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        assert_eq!(ApiError::Validation("Name required".into()).to_string(), "Name required");
        let err = ApiError::Server {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "connection refused");
    }
}
