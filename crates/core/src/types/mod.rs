//! Core types for ReturnWiz.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod handle;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use handle::{TenantHandle, TenantHandleError};
pub use id::*;
pub use price::Price;
pub use status::{ReasonCode, ReturnStatus};
