//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults match local development against
//! the backend on port 8000.
//!
//! - `RETURNWIZ_API_BASE_URL` - Base URL of the ReturnWiz backend
//!   (default: `http://localhost:8000`)
//! - `RETURNWIZ_ROOT_BRAND` - First hostname segment reserved for the
//!   merchant surface alongside `localhost`/`app`/`www` (default: `returnwiz`)
//! - `RETURNWIZ_TENANT_DOMAIN` - Domain suffix under which tenant portals are
//!   published, e.g. `min-shop.returnwiz.dk` (default: `returnwiz.dk`)
//! - `RETURNWIZ_SESSION_FILE` - Path for the persisted session blob; when
//!   unset, sessions live only in memory

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend endpoint for local development.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default root brand segment.
const DEFAULT_ROOT_BRAND: &str = "returnwiz";

/// Default tenant portal domain suffix.
const DEFAULT_TENANT_DOMAIN: &str = "returnwiz.dk";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Portal application configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the ReturnWiz backend service.
    pub api_base_url: Url,
    /// Root brand hostname segment reserved for the merchant surface.
    pub root_brand: String,
    /// Domain suffix for published tenant portals.
    pub tenant_domain: String,
    /// Optional path for the persisted session blob.
    pub session_file: Option<PathBuf>,
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `RETURNWIZ_API_BASE_URL` is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("RETURNWIZ_API_BASE_URL", DEFAULT_API_BASE_URL);
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("RETURNWIZ_API_BASE_URL".to_string(), e.to_string())
        })?;

        let root_brand = get_env_or_default("RETURNWIZ_ROOT_BRAND", DEFAULT_ROOT_BRAND);
        let tenant_domain = get_env_or_default("RETURNWIZ_TENANT_DOMAIN", DEFAULT_TENANT_DOMAIN);
        let session_file = std::env::var("RETURNWIZ_SESSION_FILE").ok().map(PathBuf::from);

        Ok(Self {
            api_base_url,
            root_brand,
            tenant_domain,
            session_file,
        })
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            // The default is a compile-time constant and always parses
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default base URL is valid")),
            root_brand: DEFAULT_ROOT_BRAND.to_string(),
            tenant_domain: DEFAULT_TENANT_DOMAIN.to_string(),
            session_file: None,
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
