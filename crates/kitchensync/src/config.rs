//! Configuration management for kitchensync.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::recipe::{Category, OwnerId};
use crate::session::SessionUser;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "kitchensync";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `KSYNC_`, sections separated by
///    `__`, e.g. `KSYNC_REMOTE__BASE_URL`)
/// 2. TOML config file at `~/.config/kitchensync/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote store configuration.
    pub remote: RemoteConfig,
    /// Session identity configuration.
    pub session: SessionConfig,
    /// Recipe defaults.
    pub recipes: RecipesConfig,
}

/// Remote store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the remote document service.
    /// When unset, records are kept in process memory only.
    pub base_url: Option<String>,
    /// Bearer token sent with every request.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Session identity configuration.
///
/// Stands in for the external identity provider: when `user_id` is unset,
/// no session is active and commands that need one are refused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Stable user identifier records are scoped to.
    pub user_id: Option<String>,
    /// Account email address.
    pub email: Option<String>,
}

/// Recipe defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipesConfig {
    /// Category applied when a new recipe does not specify one.
    pub default_category: Category,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `KSYNC_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("KSYNC_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.remote.base_url {
            if base_url.trim().is_empty() {
                return Err(Error::config_validation(
                    "remote.base_url must not be blank when set",
                ));
            }
        }

        if self.remote.timeout_secs == 0 {
            return Err(Error::config_validation(
                "remote.timeout_secs must be greater than 0",
            ));
        }

        if let Some(user_id) = &self.session.user_id {
            if user_id.trim().is_empty() {
                return Err(Error::config_validation(
                    "session.user_id must not be blank when set",
                ));
            }
        }

        Ok(())
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs)
    }

    /// The configured session identity, if one is set.
    #[must_use]
    pub fn session_user(&self) -> Option<SessionUser> {
        self.session.user_id.as_ref().map(|user_id| {
            SessionUser::new(
                OwnerId::new(user_id.clone()),
                self.session.email.clone().unwrap_or_default(),
            )
        })
    }
}
