//! CLI command implementations.

pub mod account;
pub mod returns;
pub mod tenant;

use std::path::PathBuf;

use thiserror::Error;

use returnwiz_portal::api::HttpPortalApi;
use returnwiz_portal::config::{ConfigError, PortalConfig};
use returnwiz_portal::error::PortalError;
use returnwiz_portal::session::JsonFileStore;

/// Default session blob path when `RETURNWIZ_SESSION_FILE` is unset.
const DEFAULT_SESSION_FILE: &str = ".returnwiz-session.json";

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A portal workflow action failed.
    #[error(transparent)]
    Portal(#[from] PortalError),

    /// A branding asset file could not be read.
    #[error("Could not read asset file {path}: {source}")]
    AssetRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A requested line item is not part of the located order.
    #[error("Item {0} is not part of this order")]
    UnknownItem(String),
}

/// Load configuration and build the HTTP client against the backend.
pub fn portal_api() -> Result<(PortalConfig, HttpPortalApi), CliError> {
    dotenvy::dotenv().ok();
    let config = PortalConfig::from_env()?;
    let api = HttpPortalApi::new(&config);
    Ok((config, api))
}

/// The session store the CLI persists merchant logins in.
pub fn session_store(config: &PortalConfig) -> JsonFileStore {
    let path = config
        .session_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
    JsonFileStore::new(path)
}
