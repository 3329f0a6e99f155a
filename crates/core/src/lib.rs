//! ReturnWiz Core - Shared types library.
//!
//! This crate provides common types used across all ReturnWiz components:
//! - `portal` - The customer/merchant portal workflow core
//! - `cli` - Command-line driver for the portal workflows
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, tenant
//!   handles, and status/reason enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
