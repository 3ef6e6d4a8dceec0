//! # datamcfly-core
//!
//! Shared building blocks for Data McFly clients:
//!
//! - **[`settings`]** - the operation registry: base URL plus HTTP method and
//!   URL template of every named operation, per API version
//! - **[`slug`]** - placeholder substitution for URL templates
//! - **[`transport`]** - the contract an HTTP transport implements
//! - **[`config`]** - profile-based configuration for API key, version and proxy
//! - **[`error`]** - the unified [`CoreError`] type
//!
//! ```rust
//! use datamcfly_core::{Operation, PathParams, Settings};
//!
//! let settings = Settings::new("v1")?;
//! let request = settings.prepare(
//!     Operation::ListCollections,
//!     &PathParams::new().db("shop"),
//! )?;
//! assert_eq!(
//!     request.to_string(),
//!     "GET https://api.datamcfly.com/apps/shop/collections"
//! );
//! # Ok::<(), datamcfly_core::CoreError>(())
//! ```

pub mod config;
pub mod error;
pub mod settings;
pub mod slug;
pub mod transport;

pub use error::{CoreError, Result};
pub use settings::{ApiVersion, HttpMethod, Operation, OperationDef, PreparedRequest, Settings};
pub use slug::{PathParams, Placeholder};
pub use transport::{Connect, ConnectionParams, Transport};
