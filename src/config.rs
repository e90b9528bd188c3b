//! Application configuration, read from the environment.
//!
//! Values usually arrive through a `.env` file loaded by `main` before
//! this runs. The API bearer token is deliberately not part of the
//! config: it is loaded directly where the gateway is constructed.

use crate::errors::{Error, Result};
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable naming the API base URL. Required.
pub const API_URL_VAR: &str = "FINBUDDY_API_URL";
/// Environment variable naming the settings file path. Optional.
pub const SETTINGS_PATH_VAR: &str = "FINBUDDY_SETTINGS_PATH";

const DEFAULT_SETTINGS_PATH: &str = "settings.toml";

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote FinBuddy API
    pub api_base_url: String,
    /// Path of the TOML file holding the manual income figures
    pub settings_path: PathBuf,
}

/// Loads the application configuration from the environment.
pub fn load_app_configuration() -> Result<AppConfig> {
    let api_base_url = env::var(API_URL_VAR)
        .map_err(|_| Error::Config(format!("{API_URL_VAR} is not set")))?;
    let settings_path = env::var(SETTINGS_PATH_VAR)
        .map_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from);
    debug!(
        "Configuration: api_base_url={}, settings_path={:?}",
        api_base_url, settings_path
    );
    Ok(AppConfig {
        api_base_url,
        settings_path,
    })
}
