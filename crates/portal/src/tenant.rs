//! Tenant resolution.
//!
//! Decides, once per application load, whether the portal renders the
//! customer-facing return flow (a tenant's subdomain) or the merchant-facing
//! admin/onboarding surface (the apex and reserved hostnames).

use returnwiz_core::TenantHandle;

/// First hostname segments that always map to the merchant surface.
///
/// `127` covers dotted loopback addresses such as `127.0.0.1`, whose first
/// dot-segment is `127`. The root brand segment comes from configuration and
/// is checked alongside these.
const RESERVED_SEGMENTS: [&str; 4] = ["localhost", "app", "www", "127"];

/// Which surface the portal renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortalMode {
    /// Customer-facing return flow for one tenant.
    Customer,
    /// Merchant-facing administration and onboarding surface.
    Merchant,
}

/// The resolved tenant context for this application load.
///
/// Modelled as an enum so a customer context always carries a tenant handle
/// and a merchant context never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantContext {
    /// Customer surface, addressed by a tenant's subdomain (or the `shop`
    /// override parameter during development).
    Customer {
        /// The tenant whose portal is being viewed.
        handle: TenantHandle,
    },
    /// Merchant surface on the apex or a reserved hostname.
    Merchant,
}

impl TenantContext {
    /// Which surface this context selects.
    #[must_use]
    pub const fn mode(&self) -> PortalMode {
        match self {
            Self::Customer { .. } => PortalMode::Customer,
            Self::Merchant => PortalMode::Merchant,
        }
    }

    /// The tenant handle, present iff this is a customer context.
    #[must_use]
    pub const fn handle(&self) -> Option<&TenantHandle> {
        match self {
            Self::Customer { handle } => Some(handle),
            Self::Merchant => None,
        }
    }
}

/// Derives the active [`TenantContext`] from the runtime environment.
///
/// Pure and infallible; holds no state beyond the configured root brand.
/// The verdict must be recomputed per load, never cached across hostname
/// changes.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    root_brand: String,
}

impl TenantResolver {
    /// Create a resolver for the given root brand segment (e.g. `returnwiz`).
    pub fn new(root_brand: impl Into<String>) -> Self {
        Self {
            root_brand: root_brand.into().to_lowercase(),
        }
    }

    /// Resolve the tenant context from a hostname and an optional `shop`
    /// override parameter.
    ///
    /// The override parameter is a development escape hatch: when present and
    /// non-empty it is taken as the tenant handle regardless of the hostname.
    /// Otherwise the first dot-segment of the hostname decides: a bare
    /// hostname or a reserved first segment selects the merchant surface,
    /// anything else is a tenant subdomain.
    #[must_use]
    pub fn resolve(&self, hostname: &str, override_param: Option<&str>) -> TenantContext {
        if let Some(handle) = override_param.filter(|s| !s.is_empty()) {
            tracing::debug!(handle, "tenant resolved from override parameter");
            return TenantContext::Customer {
                handle: TenantHandle::new(handle),
            };
        }

        let mut segments = hostname.split('.');
        // split always yields at least one element
        let first = segments.next().unwrap_or("").to_lowercase();
        let has_more = segments.next().is_some();

        if !has_more || self.is_reserved(&first) {
            return TenantContext::Merchant;
        }

        TenantContext::Customer {
            handle: TenantHandle::new(first),
        }
    }

    fn is_reserved(&self, segment: &str) -> bool {
        segment == self.root_brand || RESERVED_SEGMENTS.contains(&segment)
    }
}
