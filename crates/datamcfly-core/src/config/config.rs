//! Configuration management for Data McFly clients
//!
//! Configuration is stored in TOML format with support for multiple named
//! profiles:
//!
//! ```toml
//! default_profile = "production"
//!
//! [profiles.production]
//! api_key = "${DATAMCFLY_PROD_KEY}"
//!
//! [profiles.local]
//! api_key = "dev-key"
//! version = "v1"
//! proxy_url = "http://127.0.0.1:8000"
//! ```

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::credential::resolve_api_key;
use super::error::{ConfigError, Result};
use crate::settings::ApiVersion;
use crate::transport::ConnectionParams;

/// Environment variable overriding a profile's API key
pub const API_KEY_ENV: &str = "DATAMCFLY_API_KEY";
/// Environment variable overriding a profile's proxy URL
pub const PROXY_URL_ENV: &str = "DATAMCFLY_PROXY_URL";

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is named explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Individual profile configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    /// API key, plaintext or a `keyring:` reference
    pub api_key: String,
    /// REST API version
    #[serde(default = "default_version")]
    pub version: String,
    /// Proxy URL; system proxy settings apply when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

fn default_version() -> String {
    ApiVersion::default().as_str().to_string()
}

impl Profile {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            version: default_version(),
            proxy_url: None,
        }
    }

    /// Resolve this profile into connection parameters
    ///
    /// The API key is resolved by [`resolve_api_key`] (environment override,
    /// then keyring, then plaintext); `name` is only used in error messages.
    pub fn resolve_connection(&self, name: &str) -> Result<ConnectionParams> {
        let api_key = resolve_api_key(&self.api_key, Some(API_KEY_ENV))
            .map_err(|e| {
                ConfigError::CredentialError(format!("Failed to resolve API key: {}", e))
            })?;

        let version =
            self.version
                .parse::<ApiVersion>()
                .map_err(|_| ConfigError::InvalidVersion {
                    profile: name.to_string(),
                    version: self.version.clone(),
                })?;

        let proxy_url = std::env::var(PROXY_URL_ENV)
            .ok()
            .or_else(|| self.proxy_url.clone());

        debug!(
            profile = name,
            version = %version,
            proxy = proxy_url.is_some(),
            "Resolved profile connection"
        );

        Ok(ConnectionParams {
            api_key,
            version,
            proxy_url,
        })
    }
}

impl Config {
    /// Resolve the profile name to use
    ///
    /// Order: explicit name, configured default, then the first profile
    /// alphabetically.
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(name) = explicit_profile {
            if !self.profiles.contains_key(name) {
                return Err(ConfigError::ProfileNotFound {
                    name: name.to_string(),
                });
            }
            return Ok(name.to_string());
        }

        if let Some(ref default) = self.default_profile {
            return Ok(default.clone());
        }

        self.list_profiles()
            .first()
            .map(|(name, _)| (*name).clone())
            .ok_or(ConfigError::NoProfiles)
    }

    /// Resolve connection parameters for a profile
    pub fn connection(&self, explicit_profile: Option<&str>) -> Result<ConnectionParams> {
        let name = self.resolve_profile(explicit_profile)?;
        let profile = self
            .profiles
            .get(&name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.clone() })?;
        profile.resolve_connection(&name)
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        // Expand environment variables in the config content
        let expanded_content = Self::expand_env_vars(&content);

        let config: Config = toml::from_str(&expanded_content)?;

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Set or update a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile by name
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// List all profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Get the path to the configuration file
    ///
    /// On macOS, `~/.config/datamcfly/config.toml` is preferred when it (or
    /// its directory) exists, falling back to the platform location.
    ///
    /// On Linux: ~/.config/datamcfly/config.toml
    /// On Windows: %APPDATA%\datamcfly\datamcfly\config.toml
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_path = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("datamcfly")
                    .join("config.toml");

                if linux_style_path.exists()
                    || linux_style_path
                        .parent()
                        .map(|p| p.exists())
                        .unwrap_or(false)
                {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs = ProjectDirs::from("com", "datamcfly", "datamcfly")
            .ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}` references
    ///
    /// Unset variables without a default are left as-is so profiles that are
    /// never used do not need their variables defined.
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok())
            .to_string()
    }
}
