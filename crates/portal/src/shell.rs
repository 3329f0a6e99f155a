//! The portal shell: one mounted surface per application load.
//!
//! [`Portal::mount`] runs tenant resolution exactly once and hands back
//! either the customer surface (a return workflow bound to one tenant) or
//! the merchant surface (session, onboarding wizard, dashboard). The two
//! never coexist; switching tenants means a fresh mount.

use tracing::info;

use returnwiz_core::TenantHandle;

use crate::api::{PortalApi, ReturnOverview};
use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::session::{SessionContext, SessionStore};
use crate::tenant::{TenantContext, TenantResolver};
use crate::workflow::{OnboardingWorkflow, ReturnWorkflow};

/// User-facing message when the dashboard listing cannot be loaded.
const DASHBOARD_FAILED: &str = "Could not load dashboard data.";

/// The mounted portal surface.
pub enum Portal<A, S> {
    /// Customer-facing return flow for one tenant.
    Customer(CustomerPortal<A>),
    /// Merchant-facing administration and onboarding surface.
    Merchant(MerchantPortal<A, S>),
}

impl<A: PortalApi + Clone, S: SessionStore> Portal<A, S> {
    /// Resolve the tenant context and mount the matching surface.
    ///
    /// `hostname` is the host the portal was loaded under; `shop_override`
    /// is the development override parameter, if present. The session store
    /// is only consulted on the merchant surface.
    pub fn mount(
        config: &PortalConfig,
        hostname: &str,
        shop_override: Option<&str>,
        api: A,
        store: S,
    ) -> Self {
        let resolver = TenantResolver::new(&config.root_brand);
        match resolver.resolve(hostname, shop_override) {
            TenantContext::Customer { handle } => {
                info!(tenant = %handle, "mounting customer portal");
                Self::Customer(CustomerPortal {
                    tenant: handle,
                    returns: ReturnWorkflow::new(api),
                })
            }
            TenantContext::Merchant => {
                info!("mounting merchant portal");
                Self::Merchant(MerchantPortal {
                    onboarding: OnboardingWorkflow::new(api.clone(), &config.tenant_domain),
                    session: SessionContext::restore(store),
                    api,
                })
            }
        }
    }
}

impl<A, S> Portal<A, S> {
    /// The customer surface, if that is what was mounted.
    #[must_use]
    pub const fn as_customer(&self) -> Option<&CustomerPortal<A>> {
        match self {
            Self::Customer(portal) => Some(portal),
            Self::Merchant(_) => None,
        }
    }

    /// The merchant surface, if that is what was mounted.
    #[must_use]
    pub const fn as_merchant(&self) -> Option<&MerchantPortal<A, S>> {
        match self {
            Self::Merchant(portal) => Some(portal),
            Self::Customer(_) => None,
        }
    }
}

/// The customer surface: one tenant's return flow.
pub struct CustomerPortal<A> {
    tenant: TenantHandle,
    /// The return journey, starting at the order search.
    pub returns: ReturnWorkflow<A>,
}

impl<A> CustomerPortal<A> {
    /// The tenant whose portal this is.
    #[must_use]
    pub const fn tenant(&self) -> &TenantHandle {
        &self.tenant
    }
}

/// The merchant surface: session, onboarding, dashboard.
pub struct MerchantPortal<A, S> {
    api: A,
    /// The merchant's login session.
    pub session: SessionContext<S>,
    /// The onboarding wizard, starting at the company step.
    pub onboarding: OnboardingWorkflow<A>,
}

impl<A: PortalApi, S: SessionStore> MerchantPortal<A, S> {
    /// Load the logged-in merchant's return cases.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a session; `Dashboard` with a generic
    /// message if the listing cannot be loaded.
    pub async fn dashboard(&self) -> Result<Vec<ReturnOverview>, PortalError> {
        let session = self
            .session
            .current()
            .ok_or(PortalError::NotAuthenticated)?;

        self.api.list_returns(&session.email).await.map_err(|err| {
            tracing::warn!(error = %err, "dashboard listing failed");
            PortalError::Dashboard(DASHBOARD_FAILED.to_string())
        })
    }
}
