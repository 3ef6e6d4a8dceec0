//! API key resolution
//!
//! A profile's `api_key` is either the key itself or a `keyring:<entry>`
//! reference into the OS keyring (requires the `secure-storage` feature).
//! An environment variable, when set, takes precedence over both.

use std::env;

use tracing::debug;

use super::error::{ConfigError, Result};

/// Prefix marking an API key stored in the OS keyring
pub const KEYRING_PREFIX: &str = "keyring:";

/// Keyring service the entries live under
#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "datamcfly";

/// Resolve a configured API key
///
/// Resolution order:
/// 1. `env_var`, if given and set
/// 2. the keyring entry named by a `keyring:` reference
/// 3. `value` itself
pub fn resolve_api_key(value: &str, env_var: Option<&str>) -> Result<String> {
    if let Some(var) = env_var
        && let Ok(key) = env::var(var)
    {
        debug!(env_var = var, "API key taken from environment");
        return Ok(key);
    }

    match value.strip_prefix(KEYRING_PREFIX) {
        Some(entry) => from_keyring(entry),
        None => Ok(value.to_string()),
    }
}

#[cfg(feature = "secure-storage")]
fn from_keyring(entry: &str) -> Result<String> {
    debug!(entry, "Looking up API key in keyring");
    keyring::Entry::new(SERVICE_NAME, entry)
        .and_then(|e| e.get_password())
        .map_err(|e| {
            ConfigError::KeyringError(format!("keyring entry '{}': {}", entry, e))
        })
}

#[cfg(not(feature = "secure-storage"))]
fn from_keyring(entry: &str) -> Result<String> {
    Err(ConfigError::CredentialError(format!(
        "'{}{}' needs the secure-storage feature",
        KEYRING_PREFIX, entry
    )))
}
