//! Error types for the AICompare client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the AICompare crates.
///
/// API failures are split by origin: the server rejecting credentials
/// (`Auth`), the server answering a question request with a non-success
/// status (`Request`), and the request never reaching a server at all
/// (`Transport`).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareError {
    /// Login or registration was rejected by the server
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Ask/humanize request answered with a non-success HTTP status
    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// Network-level fault (DNS, connection refused, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A success response whose body could not be decoded
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl CompareError {
    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Creates a Request error
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an authentication rejection
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Check if this is a network-level fault rather than an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CompareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CompareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CompareError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("TOML - {err}"))
    }
}

/// A type alias for `Result<T, CompareError>`.
pub type Result<T> = std::result::Result<T, CompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_request_errors() {
        assert_eq!(CompareError::request(500, "boom").status(), Some(500));
        assert_eq!(CompareError::transport("refused").status(), None);
        assert_eq!(CompareError::auth("nope").status(), None);
    }

    #[test]
    fn test_transport_and_request_are_distinguishable() {
        let transport = CompareError::transport("connection refused");
        let request = CompareError::request(503, "Failed to get AI answers");

        assert!(transport.is_transport());
        assert!(!request.is_transport());
        assert_eq!(
            request.to_string(),
            "Request failed (503): Failed to get AI answers"
        );
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: CompareError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, CompareError::Decode { .. }));
    }
}
