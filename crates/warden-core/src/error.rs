//! Error types for warden.
//!
//! Every failure that crosses the transport boundary is normalized into one
//! of these variants, so nothing above the HTTP layer ever branches on
//! `reqwest` errors or inspects a response envelope.

use std::fmt;
use thiserror::Error;

/// Message carried by every [`NetworkError`].
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Message used when an error envelope carries no message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// The unified error type for warden operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The server accepted the call but reported a business-level failure.
    #[error("application error: {0}")]
    Application(#[from] ApplicationError),

    /// The server rejected the call as unauthenticated (HTTP 401).
    #[error("authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    /// No response reached the client (timeout, connectivity).
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Any other non-success HTTP status.
    #[error("HTTP error: {0}")]
    Status(#[from] StatusError),

    /// A success payload did not have the expected shape.
    #[error("unexpected response: {message}")]
    Decode { message: String },

    /// Invalid configuration or input (bad base URL, malformed settings).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this error means the session is no longer valid.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Error::Authorization(_))
    }

    /// Returns true if no response reached the client.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// HTTP-equivalent status for this error, if one applies.
    ///
    /// Network errors report `0`; application errors report `200` because
    /// they arrive inside a successful response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Application(_) => Some(200),
            Error::Authorization(e) => Some(e.status),
            Error::Network(e) => Some(e.status),
            Error::Status(e) => Some(e.status),
            Error::Decode { .. } | Error::InvalidInput(_) => None,
        }
    }

    /// Human-readable message suitable for display to a user.
    pub fn message(&self) -> String {
        match self {
            Error::Application(e) => e.message.clone(),
            Error::Authorization(e) => e.message.clone(),
            Error::Network(e) => e.message.clone(),
            Error::Status(e) => e.message.clone(),
            Error::Decode { message } => message.clone(),
            Error::InvalidInput(e) => e.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode {
            message: err.to_string(),
        }
    }
}

/// Business-level failure reported inside a response envelope (`code != 0`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct ApplicationError {
    /// Envelope code (never 0).
    pub code: i64,
    /// Envelope message, or [`UNKNOWN_ERROR_MESSAGE`].
    pub message: String,
}

impl ApplicationError {
    /// Build from envelope fields, defaulting a missing or empty message.
    pub fn new(code: i64, message: Option<String>) -> Self {
        Self {
            code,
            message: non_empty_or(message, UNKNOWN_ERROR_MESSAGE),
        }
    }
}

/// The server rejected the call as unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationError {
    /// HTTP status code (401).
    pub status: u16,
    /// Envelope code from the error body, if one was present.
    pub code: Option<i64>,
    /// Message from the error body, or a generic status message.
    pub message: String,
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_status(f, self.status, self.code, &self.message)
    }
}

impl std::error::Error for AuthorizationError {}

/// Non-success HTTP status other than 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    /// HTTP status code.
    pub status: u16,
    /// Envelope code from the error body, if one was present.
    pub code: Option<i64>,
    /// Message from the error body, or a generic status message.
    pub message: String,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_status(f, self.status, self.code, &self.message)
    }
}

impl std::error::Error for StatusError {}

/// No response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NetworkError {
    /// Always 0: there is no HTTP status without a response.
    pub status: u16,
    pub message: String,
}

impl NetworkError {
    /// The one network error the transport produces.
    pub fn unreachable() -> Self {
        Self {
            status: 0,
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Invalid configuration value.
    #[error("invalid setting {key}='{value}': {reason}")]
    Setting {
        key: String,
        value: String,
        reason: String,
    },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

fn write_status(
    f: &mut fmt::Formatter<'_>,
    status: u16,
    code: Option<i64>,
    message: &str,
) -> fmt::Result {
    write!(f, "HTTP {}", status)?;
    if let Some(code) = code {
        write!(f, " [{}]", code)?;
    }
    write!(f, ": {}", message)
}

pub(crate) fn non_empty_or(message: Option<String>, fallback: &str) -> String {
    match message {
        Some(m) if !m.is_empty() => m,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_defaults_missing_message() {
        let err = ApplicationError::new(7, None);
        assert_eq!(err.message, "Unknown error");

        let err = ApplicationError::new(7, Some(String::new()));
        assert_eq!(err.message, "Unknown error");

        let err = ApplicationError::new(7, Some("bad password".into()));
        assert_eq!(err, ApplicationError { code: 7, message: "bad password".into() });
    }

    #[test]
    fn network_error_has_zero_status() {
        let err = Error::from(NetworkError::unreachable());
        assert_eq!(err.status(), Some(0));
        assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
        assert!(err.is_network());
        assert!(!err.is_authorization());
    }

    #[test]
    fn authorization_error_display_includes_code() {
        let err = AuthorizationError {
            status: 401,
            code: Some(401),
            message: "Token has expired".into(),
        };
        assert_eq!(err.to_string(), "HTTP 401 [401]: Token has expired");
        assert!(Error::from(err).is_authorization());
    }

    #[test]
    fn status_error_display_without_code() {
        let err = StatusError {
            status: 503,
            code: None,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }
}
