//! Unified error handling for the portal workflows.
//!
//! Every network-origin error is terminal for the in-flight action only: the
//! owning workflow returns to the state it was in before the action and keeps
//! a single human-readable message for display. Nothing is retried
//! automatically and nothing escalates to a process-wide failure; `restart()`
//! / `reset()` always clears error state along with all transient data.

use thiserror::Error;

use crate::session::SessionStoreError;

/// Application-level error type for the portal workflows.
#[derive(Debug, Error)]
pub enum PortalError {
    /// A required field is missing or malformed. Caught before any network
    /// call; never reaches the backend.
    #[error("{0}")]
    Validation(String),

    /// Order lookup rejected (order not found or mismatched email).
    #[error("{0}")]
    Lookup(String),

    /// Return creation rejected by the backend.
    #[error("{0}")]
    Submission(String),

    /// Tenant registration rejected, often carrying a server-supplied
    /// reason string surfaced verbatim.
    #[error("{0}")]
    Registration(String),

    /// Login rejected. Deliberately carries no further detail.
    #[error("Invalid credentials.")]
    Auth,

    /// The merchant surface was used without a current session.
    #[error("Not logged in.")]
    NotAuthenticated,

    /// Dashboard data could not be loaded.
    #[error("{0}")]
    Dashboard(String),

    /// The requested action is not available in the workflow's current state.
    #[error("Action not available in the current state.")]
    InvalidAction,

    /// Reading or writing the persisted session blob failed.
    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),
}

/// Result type alias for `PortalError`.
pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_is_generic() {
        // Login failures must never leak backend detail
        assert_eq!(PortalError::Auth.to_string(), "Invalid credentials.");
    }

    #[test]
    fn test_registration_error_is_verbatim() {
        let err = PortalError::Registration("email exists".to_string());
        assert_eq!(err.to_string(), "email exists");
    }
}
