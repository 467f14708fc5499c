//! Error types for the Storymill client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the book service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived (includes timeouts)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Bearer credential missing or rejected (401/403); re-authentication required
    #[error("session expired: bearer credential missing or rejected")]
    SessionExpired,

    /// Book does not exist or was deleted
    #[error("book not found: {0}")]
    NotFound(String),

    /// Server refuses this client version (HTTP 426)
    #[error("the server requires a newer client version")]
    UpdateRequired,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Whether a polling loop should keep running after this error.
    ///
    /// Session, not-found, and forced-upgrade failures cannot be fixed
    /// by polling again; anything else (network failure, timeout, 5xx,
    /// malformed body) is worth another attempt on the next tick.
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            Self::SessionExpired
                | Self::NotFound(_)
                | Self::UpdateRequired
                | Self::InvalidRequest(_)
        )
    }
}
