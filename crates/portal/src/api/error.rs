//! API client error types.

use thiserror::Error;

/// Errors that can occur when talking to the ReturnWiz backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connection, DNS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("API error: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The `detail` field of the error body, when the backend sent one.
        detail: Option<String>,
    },

    /// A 2xx response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The server-supplied `detail` message, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }
}
