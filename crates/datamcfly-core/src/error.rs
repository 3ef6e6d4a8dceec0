//! Unified error handling for datamcfly-core
//!
//! Registry, slug rendering, transport and configuration failures all surface
//! as a [`CoreError`].
//!
//! # Example
//!
//! ```rust
//! use datamcfly_core::{CoreError, Settings};
//!
//! let err = Settings::new("v2").unwrap_err();
//! assert!(err.is_unsupported_version());
//! assert!(matches!(err, CoreError::UnsupportedVersion { .. }));
//! ```

use thiserror::Error;

use crate::config::ConfigError;

/// Core error type for Data McFly clients
#[derive(Error, Debug)]
pub enum CoreError {
    /// The registry has no data for the requested API version
    #[error("Unsupported API version '{version}'")]
    UnsupportedVersion { version: String },

    /// An operation name that is not part of the registry
    #[error("Unknown operation '{name}'")]
    UnknownOperation { name: String },

    /// A URL template placeholder had no value
    #[error("Missing parameter '{parameter}' for operation '{operation}'")]
    MissingParameter {
        operation: String,
        parameter: String,
    },

    /// A path value that would not stay a single path segment
    #[error("Invalid value '{value}' for parameter '{parameter}' of operation '{operation}'")]
    InvalidParameter {
        operation: String,
        parameter: String,
        value: String,
    },

    /// A URL template could not be parsed
    #[error("Invalid URL template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// The rendered URL could not be joined onto the base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failure reported by the transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if the requested API version is not supported
    #[must_use]
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, CoreError::UnsupportedVersion { .. })
    }

    /// Returns true if a URL placeholder had no value
    #[must_use]
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, CoreError::MissingParameter { .. })
    }

    /// Returns true if a path value was missing or unusable
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            CoreError::MissingParameter { .. } | CoreError::InvalidParameter { .. }
        )
    }

    /// Returns true if the failure came from the transport
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, CoreError::Transport(_))
    }
}
