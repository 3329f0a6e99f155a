//! Tenant handle type.
//!
//! A tenant handle is the subdomain label that addresses one merchant's
//! returns portal, e.g. `myshop` in `myshop.returnwiz.com`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`TenantHandle`] from user input.
#[derive(thiserror::Error, Debug, Clone)]
pub enum TenantHandleError {
    /// The input string is empty.
    #[error("handle cannot be empty")]
    Empty,
    /// The input string is too long for a DNS label.
    #[error("handle must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("handle may only contain lowercase letters, digits, and hyphens")]
    InvalidCharacter,
    /// The input starts or ends with a hyphen.
    #[error("handle cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A merchant's tenant handle (subdomain label).
///
/// Two construction paths exist:
///
/// - [`TenantHandle::new`] normalizes any non-empty string to lowercase
///   without validating. Hostname segments are valid DNS labels by the time
///   they reach us, so tenant resolution stays infallible.
/// - [`TenantHandle::parse`] validates user input, used when a merchant
///   chooses their webshop handle during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TenantHandle(String);

impl TenantHandle {
    /// Maximum length of a handle (DNS label limit).
    pub const MAX_LENGTH: usize = 63;

    /// Create a handle from a trusted source such as a hostname segment.
    ///
    /// The value is lowercased but not otherwise validated.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into().to_lowercase())
    }

    /// Parse a handle from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 63 characters,
    /// contains a character outside `[a-z0-9-]` (after lowercasing), or
    /// starts/ends with a hyphen.
    pub fn parse(s: &str) -> Result<Self, TenantHandleError> {
        if s.is_empty() {
            return Err(TenantHandleError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(TenantHandleError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let lowered = s.to_lowercase();

        if !lowered
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(TenantHandleError::InvalidCharacter);
        }

        if lowered.starts_with('-') || lowered.ends_with('-') {
            return Err(TenantHandleError::EdgeHyphen);
        }

        Ok(Self(lowered))
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the handle and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TenantHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TenantHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
