//! Error types for hkadm-console
//!
//! Three families reach the operator:
//! - validation errors, raised before any network call
//! - gateway errors (4xx/5xx) carrying the backend's message when it sent one
//! - network errors (connection refused, timeout)

use thiserror::Error;

/// Generic text used when the backend gives no usable message
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Shown for connection-level failures
pub const UNREACHABLE_MESSAGE: &str =
    "Cannot reach the backend. Check that the server is running.";

/// Console result type
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Console error type
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Rejected client-side before any request was sent
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Backend answered with a non-success status
    #[error("Gateway error {status}: {message}")]
    Gateway { status: u16, message: String },

    /// Request never got an answer
    #[error("Network error: {0}")]
    Network(String),

    /// Operation needs an active hackathon and none is set
    #[error("No active hackathon")]
    NoActiveHackathon,

    /// Operation needs an admin session
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The owning service was disposed while the request was in flight
    #[error("Operation cancelled")]
    Cancelled,

    /// hkadm-common error
    #[error("Common error: {0}")]
    Common(#[from] hkadm_common::Error),
}

impl ConsoleError {
    /// Text suitable for a transient notification
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Validation(msg) | ConsoleError::Forbidden(msg) => msg.clone(),
            ConsoleError::Gateway { message, .. } if !message.trim().is_empty() => message.clone(),
            ConsoleError::Gateway { .. } => FALLBACK_MESSAGE.to_string(),
            ConsoleError::Network(_) => UNREACHABLE_MESSAGE.to_string(),
            ConsoleError::NoActiveHackathon => "No active hackathon".to_string(),
            ConsoleError::Decode(_) | ConsoleError::Common(_) => FALLBACK_MESSAGE.to_string(),
            ConsoleError::Cancelled => "Operation cancelled".to_string(),
        }
    }

    /// HTTP status for gateway errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ConsoleError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ConsoleError::Gateway {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or(FALLBACK_MESSAGE)
                    .to_string(),
            }
        } else {
            ConsoleError::Network(err.to_string())
        }
    }
}
