//! # datamcfly
//!
//! Driver-flavoured access to Data McFly apps: a [`DataMcFlyClient`] hands out
//! [`Database`] handles, which hand out [`Collection`] and [`Document`]
//! handles. Every call resolves its HTTP method and URL through the
//! operation registry in [`datamcfly_core::settings`] and is performed by the
//! client's [`Transport`].
//!
//! ```rust,ignore
//! use datamcfly::{DataMcFlyClient, DESCENDING};
//! use serde_json::json;
//!
//! let client = DataMcFlyClient::connect::<MyTransport>("DataMcFlyAPIKey", "v1", None)?;
//! let orders = client.database("shop").collection("orders");
//!
//! orders.insert_many(json!([{ "total": 12 }])).await?;
//! let order = orders.document("42").get().await?;
//! ```

pub mod client;
pub mod collection;
pub mod constants;
pub mod database;
pub mod document;

pub use client::DataMcFlyClient;
pub use collection::Collection;
pub use constants::{ALL, ASCENDING, DESCENDING, OFF, ProfilingLevel, SLOW_ONLY, SortOrder};
pub use database::Database;
pub use document::Document;

pub use datamcfly_core::{ApiVersion, Connect, ConnectionParams, CoreError, Result, Transport};
