//! Top-level client handle
//!
//! A [`DataMcFlyClient`] holds the API key from <https://app.datamcfly.com/>,
//! the API version and an optional proxy URL, and shares a [`Transport`] with
//! every handle derived from it.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use datamcfly_core::config::Config;
use datamcfly_core::{ApiVersion, Connect, ConnectionParams, CoreError, Result, Transport};
use serde_json::Value;
use tracing::debug;

use crate::database::Database;

/// Client for Data McFly apps
///
/// ```rust,ignore
/// let client = DataMcFlyClient::connect::<MyTransport>("DataMcFlyAPIKey", "v1", None)?;
/// assert_eq!(client.to_string(), "DataMcFlyClient('DataMcFlyAPIKey', 'v1')");
///
/// let db = client.database("database");
/// let names = client.database_names().await?;
/// ```
///
/// When no `proxy_url` is given the transport is expected to use the system
/// proxy settings.
#[derive(Clone)]
pub struct DataMcFlyClient {
    api_key: String,
    version: ApiVersion,
    proxy_url: Option<String>,
    request: Arc<dyn Transport>,
}

impl DataMcFlyClient {
    /// Build a client for the default API version without a proxy
    pub fn new<T>(api_key: impl Into<String>) -> Result<Self>
    where
        T: Connect + 'static,
    {
        Self::from_params::<T>(ConnectionParams::new(api_key, ApiVersion::default()))
    }

    /// Build a client and its transport
    ///
    /// Fails with `UnsupportedVersion` if `version` is unknown.
    pub fn connect<T>(
        api_key: impl Into<String>,
        version: &str,
        proxy_url: Option<String>,
    ) -> Result<Self>
    where
        T: Connect + 'static,
    {
        let mut params = ConnectionParams::new(api_key, version.parse()?);
        params.proxy_url = proxy_url;
        Self::from_params::<T>(params)
    }

    /// Build a client and its transport from resolved connection parameters
    ///
    /// Fails if the transport's registry is for a different API version.
    pub fn from_params<T>(params: ConnectionParams) -> Result<Self>
    where
        T: Connect + 'static,
    {
        let transport = T::connect(&params)?;
        let built_for = transport.settings().version();
        if built_for != params.version {
            return Err(CoreError::Transport(format!(
                "transport built for API version '{}' but '{}' was requested",
                built_for, params.version
            )));
        }
        Ok(Self::with_transport(
            params.api_key,
            params.proxy_url,
            Arc::new(transport),
        ))
    }

    /// Build a client from a configuration profile
    pub fn from_config<T>(config: &Config, profile: Option<&str>) -> Result<Self>
    where
        T: Connect + 'static,
    {
        let params = config.connection(profile)?;
        Self::from_params::<T>(params)
    }

    /// Wrap an existing transport
    ///
    /// The API version is the one the transport's registry was built for.
    pub fn with_transport(
        api_key: impl Into<String>,
        proxy_url: Option<String>,
        request: Arc<dyn Transport>,
    ) -> Self {
        let version = request.settings().version();
        debug!(
            version = %version,
            proxy = proxy_url.is_some(),
            "Created Data McFly client"
        );
        Self {
            api_key: api_key.into(),
            version,
            proxy_url,
            request,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }

    /// Transport used for calls to the REST API
    pub fn request(&self) -> &dyn Transport {
        self.request.as_ref()
    }

    /// Handle for the named database (app)
    ///
    /// No request is made; the server decides whether the name exists.
    pub fn database(&self, name: impl Into<String>) -> Database {
        Database::new(self.clone(), name)
    }

    /// Names of the databases visible to this API key
    pub async fn database_names(&self) -> Result<Vec<String>> {
        self.request.list_databases().await
    }

    /// Check the API key against the server
    pub async fn validate_key(&self) -> Result<Value> {
        self.request.validate_api_key().await
    }
}

/// Clients are equal when API key and version match; proxy and transport are ignored.
impl PartialEq for DataMcFlyClient {
    fn eq(&self, other: &Self) -> bool {
        (&self.api_key, self.version) == (&other.api_key, other.version)
    }
}

impl Eq for DataMcFlyClient {}

impl fmt::Debug for DataMcFlyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DataMcFlyClient({}, {})",
            Quoted(&self.api_key),
            Quoted(self.version.as_str())
        )
    }
}

impl fmt::Display for DataMcFlyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Quotes a string the way Python's `repr` does
///
/// Single quotes unless the value holds a `'` and no `"`. Backslashes, the
/// chosen quote and control characters are escaped.
pub(crate) struct Quoted<'a>(pub(crate) &'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.0.contains('\'') && !self.0.contains('"') {
            '"'
        } else {
            '\''
        };
        f.write_char(quote)?;
        for c in self.0.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c if c == quote => write!(f, "\\{}", c)?,
                c if c.is_control() && (c as u32) <= 0xff => write!(f, "\\x{:02x}", c as u32)?,
                c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
                c => f.write_char(c)?,
            }
        }
        f.write_char(quote)
    }
}
