//! Merchant session and dashboard commands.
//!
//! # Usage
//!
//! ```bash
//! rw-cli login -e owner@acme.dk -p s3cret
//! rw-cli dashboard
//! rw-cli logout
//! ```
//!
//! # Environment Variables
//!
//! - `RETURNWIZ_SESSION_FILE` - Where the session blob is persisted between
//!   invocations (default: `.returnwiz-session.json` in the working directory)

use returnwiz_portal::api::PortalApi;
use returnwiz_portal::session::SessionContext;

use super::{CliError, portal_api, session_store};

/// Authenticate a merchant and persist the session.
pub async fn login(email: &str, password: &str) -> Result<(), CliError> {
    let (config, api) = portal_api()?;
    let mut session = SessionContext::restore(session_store(&config));

    let current = session.login(&api, email, password).await?;
    tracing::info!(
        "Logged in as {} ({}), tenant {}",
        current.name,
        current.email,
        current.tenant_id
    );
    Ok(())
}

/// Clear the persisted merchant session.
pub fn logout() -> Result<(), CliError> {
    let (config, _api) = portal_api()?;
    let mut session = SessionContext::restore(session_store(&config));

    session.logout();
    tracing::info!("Logged out");
    Ok(())
}

/// List the logged-in merchant's return cases.
pub async fn dashboard() -> Result<(), CliError> {
    let (config, api) = portal_api()?;
    let session = SessionContext::restore(session_store(&config));

    let merchant = session
        .current()
        .ok_or(returnwiz_portal::error::PortalError::NotAuthenticated)?;
    tracing::info!("Return cases for {}:", merchant.email);

    let listing = api
        .list_returns(&merchant.email)
        .await
        .map_err(|err| {
            tracing::debug!(error = %err, "dashboard listing failed");
            returnwiz_portal::error::PortalError::Dashboard(
                "Could not load dashboard data.".to_string(),
            )
        })?;

    if listing.is_empty() {
        tracing::info!("  (no return cases yet)");
        return Ok(());
    }

    for case in &listing {
        tracing::info!(
            "  {} order {} - {} - {} item(s), tracking {}",
            case.id,
            case.shopify_order_number,
            case.status,
            case.items.len(),
            case.tracking_number
                .as_ref()
                .map_or("pending", |t| t.as_str())
        );
    }
    Ok(())
}
