//! Tenant resolution and onboarding commands.
//!
//! # Usage
//!
//! ```bash
//! # Which surface would a hostname mount?
//! rw-cli resolve -H min-shop.returnwiz.dk
//!
//! # Register a tenant end to end
//! rw-cli register -n "Acme ApS" -e owner@acme.dk -p s3cret -w acme \
//!     --cvr 12345678 --shopify-url acme.myshopify.com \
//!     --bring-user api@acme.dk --bring-key key-123 --bring-customer C-77 \
//!     --logo ./logo.png --banner ./banner.jpg
//! ```
//!
//! `register` walks the same three wizard steps the merchant surface runs:
//! the account is created at step 1, integration details are collected at
//! step 2, and the final commit uploads branding and finalizes the tenant.

use std::path::{Path, PathBuf};

use clap::Args;
use secrecy::SecretString;

use returnwiz_portal::tenant::{TenantContext, TenantResolver};
use returnwiz_portal::workflow::onboarding::{BrandingAsset, FormUpdate, OnboardingWorkflow};

use super::{CliError, portal_api};

/// Arguments for `rw-cli register`.
#[derive(Args)]
pub struct RegisterArgs {
    /// Company name
    #[arg(short, long)]
    pub name: String,

    /// Contact/login email
    #[arg(short, long)]
    pub email: String,

    /// Login password
    #[arg(short, long)]
    pub password: String,

    /// Webshop handle (subdomain label)
    #[arg(short, long)]
    pub webshop: Option<String>,

    /// Danish CVR registration number
    #[arg(long)]
    pub cvr: Option<String>,

    /// Shopify shop URL, e.g. `acme.myshopify.com`
    #[arg(long)]
    pub shopify_url: Option<String>,

    /// Bring carrier API user
    #[arg(long)]
    pub bring_user: Option<String>,

    /// Bring carrier API key
    #[arg(long)]
    pub bring_key: Option<String>,

    /// Bring customer ID
    #[arg(long)]
    pub bring_customer: Option<String>,

    /// Path to the portal logo image
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Path to the portal banner image
    #[arg(long)]
    pub banner: Option<PathBuf>,
}

/// Show which portal surface a hostname maps to.
pub fn resolve(hostname: &str, shop_override: Option<&str>) -> Result<(), CliError> {
    let (config, _api) = portal_api()?;
    let resolver = TenantResolver::new(&config.root_brand);

    match resolver.resolve(hostname, shop_override) {
        TenantContext::Customer { handle } => {
            tracing::info!("{hostname} -> customer portal for tenant '{handle}'");
        }
        TenantContext::Merchant => {
            tracing::info!("{hostname} -> merchant surface");
        }
    }
    Ok(())
}

/// Run the onboarding wizard from the command line.
pub async fn register(args: RegisterArgs) -> Result<(), CliError> {
    let (config, api) = portal_api()?;
    let mut wizard = OnboardingWorkflow::new(api, &config.tenant_domain);

    // Step 1: company details create the account
    wizard.update(FormUpdate {
        company_name: Some(args.name),
        email: Some(args.email),
        password: Some(SecretString::from(args.password)),
        webshop_handle: args.webshop,
        cvr_number: args.cvr,
        ..FormUpdate::default()
    });
    tracing::info!("Creating tenant account...");
    wizard.next().await?;

    // Step 2: integration details
    wizard.update(FormUpdate {
        shopify_url: args.shopify_url,
        carrier_api_user: args.bring_user,
        carrier_api_key: args.bring_key.map(SecretString::from),
        carrier_customer_id: args.bring_customer,
        ..FormUpdate::default()
    });
    wizard.next().await?;

    // Step 3: branding, then the final commit
    wizard.update(FormUpdate {
        logo: args.logo.as_deref().map(load_asset).transpose()?,
        banner: args.banner.as_deref().map(load_asset).transpose()?,
        ..FormUpdate::default()
    });
    tracing::info!("Finalizing tenant...");
    wizard.finish().await?;

    tracing::info!("Tenant registered successfully!");
    if let Some(destination) = wizard.destination() {
        tracing::info!("Portal published at: {destination}");
    }
    Ok(())
}

/// Read a branding image from disk.
fn load_asset(path: &Path) -> Result<BrandingAsset, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::AssetRead {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map_or_else(|| "asset".to_string(), |n| n.to_string_lossy().into_owned());

    let content_type = match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        // The backend stores the data URL as-is, so PNG is a safe default
        _ => "image/png",
    }
    .to_string();

    Ok(BrandingAsset {
        file_name,
        content_type,
        bytes,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_asset_detects_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banner.jpg");
        std::fs::write(&path, [0xFF, 0xD8]).unwrap();

        let asset = load_asset(&path).unwrap();
        assert_eq!(asset.content_type, "image/jpeg");
        assert_eq!(asset.file_name, "banner.jpg");
        assert_eq!(asset.bytes, vec![0xFF, 0xD8]);
    }

    #[test]
    fn test_load_asset_missing_file() {
        let err = load_asset(Path::new("/nonexistent/logo.png")).unwrap_err();
        assert!(matches!(err, CliError::AssetRead { .. }));
    }
}
