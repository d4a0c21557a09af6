// SPDX-License-Identifier: Apache-2.0

//! Configuration management for labsync.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `LABSYNC_`)
//! 2. Config file: `~/.config/labsync/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Supply the repository password via environment variable
//! LABSYNC_REPOSITORY__PASSWORD=glpat-xxxx labsync validate
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::LabsyncError;
use crate::transport::AuthMethod;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Repository connection settings.
    pub repository: RepositoryConfig,
    /// HTTP transport settings.
    pub http: HttpConfig,
}

/// Repository connection settings as read from configuration.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Project URL, e.g. `https://gitlab.example.com/group/project`.
    pub url: Option<String>,
    /// Username for the password grant.
    pub username: Option<String>,
    /// Password, or the private token when `use_private_token` is set.
    pub password: Option<String>,
    /// Treat `password` as a private token.
    pub use_private_token: bool,
    /// Explicit host URL for installations under a path prefix.
    pub base_url: Option<String>,
    /// How the token is attached to requests.
    pub auth_method: AuthMethod,
}

impl std::fmt::Debug for RepositoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("use_private_token", &self.use_private_token)
            .field("base_url", &self.base_url)
            .field("auth_method", &self.auth_method)
            .finish()
    }
}

impl RepositoryConfig {
    /// Converts into validated connection settings.
    ///
    /// # Errors
    ///
    /// Returns `LabsyncError::Config` if no repository URL is configured.
    pub fn to_settings(&self) -> Result<RepositorySettings, LabsyncError> {
        let url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| LabsyncError::Config {
                message: "repository.url is not set".to_string(),
            })?;

        Ok(RepositorySettings::builder()
            .url(url)
            .username(self.username.clone().unwrap_or_default())
            .password(SecretString::from(self.password.clone().unwrap_or_default()))
            .use_private_token(self.use_private_token)
            .maybe_base_url(self.base_url.clone())
            .auth_method(self.auth_method)
            .build())
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_seconds: u64,
    /// Read timeout in seconds.
    pub read_timeout_seconds: u64,
    /// Accept any server certificate.
    pub ignore_certificate_errors: bool,
    /// Proxy URL for all requests.
    pub proxy: Option<String>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 10,
            read_timeout_seconds: 30,
            ignore_certificate_errors: false,
            proxy: None,
            user_agent: concat!("labsync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Everything needed to open an authenticated session against one project.
#[derive(Debug, Clone, bon::Builder)]
pub struct RepositorySettings {
    /// Project URL.
    #[builder(into)]
    pub url: String,
    /// Username for the password grant.
    #[builder(into, default)]
    pub username: String,
    /// Password or private token.
    pub password: SecretString,
    /// Treat `password` as a private token.
    #[builder(default)]
    pub use_private_token: bool,
    /// Explicit host URL.
    #[builder(into)]
    pub base_url: Option<String>,
    /// How the token is attached to requests.
    #[builder(default)]
    pub auth_method: AuthMethod,
}

/// Returns the labsync configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/labsync`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("labsync");
    }
    dirs::home_dir()
        .expect("Could not determine home directory - is HOME set?")
        .join(".config")
        .join("labsync")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `LABSYNC_` and double underscore
/// for nested keys (e.g., `LABSYNC_HTTP__READ_TIMEOUT_SECONDS`).
///
/// # Errors
///
/// Returns `LabsyncError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, LabsyncError> {
    let config_path = config_file_path();

    let config = Config::builder()
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        .add_source(
            Environment::with_prefix("LABSYNC")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
