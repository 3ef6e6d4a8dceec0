//! Configuration and profile management for Data McFly clients
//!
// Allow nested config module - this is intentional for the config subsystem

#![allow(clippy::module_inception)]
//!
//! Profiles hold the API key, API version and optional proxy URL used to
//! build a transport.
//!
//! # Features
//!
//! - Multiple named profiles with a default
//! - API keys looked up in the OS keyring (optional)
//! - Environment variable expansion in config files
//! - Platform-specific config file locations

pub mod config;
pub mod credential;
pub mod error;

// Re-export main types for convenience
pub use config::{Config, Profile};
pub use credential::{KEYRING_PREFIX, resolve_api_key};
pub use error::{ConfigError, Result};
