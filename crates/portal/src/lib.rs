//! ReturnWiz portal workflow core.
//!
//! This crate drives the two surfaces of the ReturnWiz returns portal:
//!
//! - The customer surface: a finite-state return journey (find order,
//!   select items, submit, confirmation) bound to one tenant's portal.
//! - The merchant surface: login/session handling, the multi-step
//!   onboarding wizard, and the returns dashboard.
//!
//! Which surface applies is decided once per mount by [`tenant::TenantResolver`]
//! from the hostname the portal was loaded under (a `shop` override parameter
//! wins during development).
//!
//! All network access goes through the [`api::PortalApi`] trait, so the
//! workflows never see transport details and any HTTP client or test double
//! can be substituted. The shipped implementation is [`api::HttpPortalApi`].
//!
//! # Concurrency
//!
//! Every mutating workflow action takes `&mut self` and suspends while its
//! one network call is outstanding, which is what guarantees at most one
//! in-flight mutation per workflow instance. There is no cancellation and no
//! retry at this layer; a retry is always a fresh user-initiated action.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod shell;
pub mod tenant;
pub mod workflow;

pub use api::{HttpPortalApi, PortalApi};
pub use config::PortalConfig;
pub use error::PortalError;
pub use session::{Session, SessionContext, SessionStore};
pub use shell::Portal;
pub use tenant::{PortalMode, TenantContext, TenantResolver};
pub use workflow::{OnboardingStep, OnboardingWorkflow, ReturnStage, ReturnWorkflow};
