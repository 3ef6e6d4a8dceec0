//! Operation registry for the Data McFly REST API
//!
//! Maps each supported API version to its base URL and to the HTTP method and
//! URL template of every named operation. The tables are built once per
//! process and never mutated. Operation details follow the Data McFly
//! documentation at <http://datamcfly.com/docs/>.
//!
//! ```rust
//! use datamcfly_core::settings::{HttpMethod, Operation, Settings};
//!
//! let settings = Settings::new("v1").unwrap();
//! assert_eq!(settings.base_url(), "https://api.datamcfly.com/");
//!
//! let def = settings.operation(Operation::ListDocuments);
//! assert_eq!(def.method, HttpMethod::Get);
//! assert_eq!(def.slug, "apps/{db}/collections/{col}");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{CoreError, Result};
use crate::slug::{self, PathParams, Placeholder};

/// Data McFly REST API version
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ApiVersion {
    #[default]
    #[serde(rename = "v1")]
    V1,
}

impl ApiVersion {
    /// Every version the registry has data for
    pub const ALL: &[ApiVersion] = &[ApiVersion::V1];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        ApiVersion::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CoreError::UnsupportedVersion {
                version: s.to_string(),
            })
    }
}

/// Named REST operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    ValidateApiKey,
    ListDatabases,
    ListCollections,
    ListDocuments,
    /// Also used to insert a single document
    InsertDocuments,
    UpdateDocuments,
    DeleteReplaceDocuments,
    ViewDocument,
    UpdateDocument,
    DeleteDocument,
    /// Database and collection level commands
    RunCommand,
}

impl Operation {
    pub const ALL: &[Operation] = &[
        Operation::ValidateApiKey,
        Operation::ListDatabases,
        Operation::ListCollections,
        Operation::ListDocuments,
        Operation::InsertDocuments,
        Operation::UpdateDocuments,
        Operation::DeleteReplaceDocuments,
        Operation::ViewDocument,
        Operation::UpdateDocument,
        Operation::DeleteDocument,
        Operation::RunCommand,
    ];

    /// Stable operation name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ValidateApiKey => "validate-api-key",
            Operation::ListDatabases => "list-databases",
            Operation::ListCollections => "list-collections",
            Operation::ListDocuments => "list-documents",
            Operation::InsertDocuments => "insert-multiple-documents",
            Operation::UpdateDocuments => "update-multiple-documents",
            Operation::DeleteReplaceDocuments => "deletereplace-multiple-documents",
            Operation::ViewDocument => "view-document",
            Operation::UpdateDocument => "update-document",
            Operation::DeleteDocument => "delete-document",
            Operation::RunCommand => "run-database-collection-level-commands",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CoreError::UnknownOperation {
                name: s.to_string(),
            })
    }
}

/// HTTP methods used by the REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP method and URL template of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationDef {
    pub method: HttpMethod,
    /// Path relative to the base URL, with `{db}`, `{col}` and `{id}` placeholders
    pub slug: &'static str,
}

impl OperationDef {
    const fn new(method: HttpMethod, slug: &'static str) -> Self {
        Self { method, slug }
    }

    /// Placeholders this operation's slug requires
    pub fn placeholders(&self) -> Result<Vec<Placeholder>> {
        slug::placeholders(self.slug)
    }
}

/// A fully resolved request: method plus absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub operation: Operation,
    pub method: HttpMethod,
    pub url: Url,
}

impl fmt::Display for PreparedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

struct VersionTable {
    base_url: &'static str,
    operations: BTreeMap<Operation, OperationDef>,
}

static V1_TABLE: LazyLock<VersionTable> = LazyLock::new(|| {
    use HttpMethod::*;

    let collection = "apps/{db}/collections/{col}";
    let document = "apps/{db}/collections/{col}/{id}";

    VersionTable {
        base_url: "https://api.datamcfly.com/",
        operations: BTreeMap::from([
            (Operation::ValidateApiKey, OperationDef::new(Get, "validate_key")),
            (Operation::ListDatabases, OperationDef::new(Get, "apps")),
            (
                Operation::ListCollections,
                OperationDef::new(Get, "apps/{db}/collections"),
            ),
            (Operation::ListDocuments, OperationDef::new(Get, collection)),
            (Operation::InsertDocuments, OperationDef::new(Post, collection)),
            (Operation::UpdateDocuments, OperationDef::new(Put, collection)),
            (
                Operation::DeleteReplaceDocuments,
                OperationDef::new(Put, collection),
            ),
            (Operation::ViewDocument, OperationDef::new(Get, document)),
            (Operation::UpdateDocument, OperationDef::new(Put, document)),
            (Operation::DeleteDocument, OperationDef::new(Delete, document)),
            (
                Operation::RunCommand,
                OperationDef::new(Post, "apps/{db}/runCommand"),
            ),
        ]),
    }
});

fn table(version: ApiVersion) -> &'static VersionTable {
    match version {
        ApiVersion::V1 => &V1_TABLE,
    }
}

/// URL and operation details for one API version
#[derive(Clone, Copy)]
pub struct Settings {
    version: ApiVersion,
    table: &'static VersionTable,
}

impl Settings {
    /// Look up the settings for a version string
    ///
    /// Fails with [`CoreError::UnsupportedVersion`] when the registry has no
    /// data for `version`.
    pub fn new(version: &str) -> Result<Self> {
        let version = version.parse::<ApiVersion>()?;
        Ok(Self::for_version(version))
    }

    /// Settings for an already validated version
    pub fn for_version(version: ApiVersion) -> Self {
        let table = table(version);
        debug!(
            version = %version,
            base_url = table.base_url,
            operations = table.operations.len(),
            "Resolved Data McFly API settings"
        );
        Self { version, table }
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn base_url(&self) -> &'static str {
        self.table.base_url
    }

    /// Every operation defined for this version
    pub fn operations(&self) -> &'static BTreeMap<Operation, OperationDef> {
        &self.table.operations
    }

    /// Definition of a single operation
    pub fn operation(&self, operation: Operation) -> &'static OperationDef {
        // Every table covers Operation::ALL; see test_tables_are_complete
        &self.table.operations[&operation]
    }

    /// Look up an operation by its stable name
    pub fn operation_by_name(&self, name: &str) -> Result<&'static OperationDef> {
        Ok(self.operation(name.parse()?))
    }

    /// Resolve an operation into a method and absolute URL
    pub fn prepare(&self, operation: Operation, params: &PathParams) -> Result<PreparedRequest> {
        let def = self.operation(operation);
        let path = slug::render(operation, def.slug, params)?;
        let url = Url::parse(self.table.base_url)?.join(&path)?;
        debug!(operation = %operation, method = %def.method, url = %url, "Prepared request");
        Ok(PreparedRequest {
            operation,
            method: def.method,
            url,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_version(ApiVersion::default())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("version", &self.version)
            .field("base_url", &self.table.base_url)
            .field("operations", &self.table.operations.len())
            .finish()
    }
}

impl PartialEq for Settings {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for Settings {}
