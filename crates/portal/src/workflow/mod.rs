//! The portal's two finite-state workflows.
//!
//! All mutation happens through the transitions these types expose; there is
//! no other path into their state, which is what keeps the view layer free
//! of ad hoc shared mutable state.

pub mod onboarding;
pub mod returns;

pub use onboarding::{BrandingAsset, FormUpdate, OnboardingForm, OnboardingStep, OnboardingWorkflow};
pub use returns::{ReturnStage, ReturnWorkflow};
