//! Transport contract
//!
//! A [`Transport`] performs the actual HTTP calls against the REST API. This
//! crate only defines the contract: implementors supply [`Transport::send`]
//! and the registry [`Settings`] they were built with, and get one provided
//! method per named operation. Each provided method resolves the operation's
//! method and URL through the registry before handing it to `send`.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::trace;

use crate::error::Result;
use crate::settings::{ApiVersion, Operation, PreparedRequest, Settings};
use crate::slug::PathParams;

/// Values a transport is configured with
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// API key from <https://app.datamcfly.com/>
    pub api_key: String,
    pub version: ApiVersion,
    /// Explicit proxy; when unset the transport uses system proxy settings
    pub proxy_url: Option<String>,
}

impl ConnectionParams {
    pub fn new(api_key: impl Into<String>, version: ApiVersion) -> Self {
        Self {
            api_key: api_key.into(),
            version,
            proxy_url: None,
        }
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Registry settings for the configured version
    pub fn settings(&self) -> Settings {
        Settings::for_version(self.version)
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("api_key", &"***")
            .field("version", &self.version)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}

/// HTTP transport for the Data McFly REST API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Registry settings used to resolve operations
    fn settings(&self) -> &Settings;

    /// Perform `request`, optionally with a JSON body, returning the JSON response
    async fn send(&self, request: PreparedRequest, body: Option<Value>) -> Result<Value>;

    /// Resolve `operation` and send it
    async fn call(
        &self,
        operation: Operation,
        params: PathParams,
        body: Option<Value>,
    ) -> Result<Value> {
        let request = self.settings().prepare(operation, &params)?;
        trace!(%request, has_body = body.is_some(), "Dispatching to transport");
        self.send(request, body).await
    }

    async fn validate_api_key(&self) -> Result<Value> {
        self.call(Operation::ValidateApiKey, PathParams::new(), None)
            .await
    }

    /// Names of the databases visible to this API key
    async fn list_databases(&self) -> Result<Vec<String>> {
        let response = self
            .call(Operation::ListDatabases, PathParams::new(), None)
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Names of the collections in `db`
    async fn list_collections(&self, db: &str) -> Result<Vec<String>> {
        let response = self
            .call(Operation::ListCollections, PathParams::new().db(db), None)
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn list_documents(&self, db: &str, col: &str) -> Result<Value> {
        self.call(
            Operation::ListDocuments,
            PathParams::new().db(db).col(col),
            None,
        )
        .await
    }

    /// Insert one or more documents
    async fn insert_documents(&self, db: &str, col: &str, documents: Value) -> Result<Value> {
        self.call(
            Operation::InsertDocuments,
            PathParams::new().db(db).col(col),
            Some(documents),
        )
        .await
    }

    async fn update_documents(&self, db: &str, col: &str, update: Value) -> Result<Value> {
        self.call(
            Operation::UpdateDocuments,
            PathParams::new().db(db).col(col),
            Some(update),
        )
        .await
    }

    /// Replace the collection contents with `documents`
    async fn delete_replace_documents(
        &self,
        db: &str,
        col: &str,
        documents: Value,
    ) -> Result<Value> {
        self.call(
            Operation::DeleteReplaceDocuments,
            PathParams::new().db(db).col(col),
            Some(documents),
        )
        .await
    }

    async fn view_document(&self, db: &str, col: &str, id: &str) -> Result<Value> {
        self.call(
            Operation::ViewDocument,
            PathParams::new().db(db).col(col).id(id),
            None,
        )
        .await
    }

    async fn update_document(&self, db: &str, col: &str, id: &str, update: Value) -> Result<Value> {
        self.call(
            Operation::UpdateDocument,
            PathParams::new().db(db).col(col).id(id),
            Some(update),
        )
        .await
    }

    async fn delete_document(&self, db: &str, col: &str, id: &str) -> Result<Value> {
        self.call(
            Operation::DeleteDocument,
            PathParams::new().db(db).col(col).id(id),
            None,
        )
        .await
    }

    /// Run a database or collection level command
    async fn run_command(&self, db: &str, command: Value) -> Result<Value> {
        self.call(Operation::RunCommand, PathParams::new().db(db), Some(command))
            .await
    }
}

/// Transports that can be built from [`ConnectionParams`]
pub trait Connect: Transport + Sized {
    fn connect(params: &ConnectionParams) -> Result<Self>;
}
