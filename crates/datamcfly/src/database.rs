//! Database (app) handles

use std::fmt;

use datamcfly_core::{Result, Transport};
use serde_json::Value;

use crate::client::{DataMcFlyClient, Quoted};
use crate::collection::Collection;

/// A named database accessed through a [`DataMcFlyClient`]
#[derive(Clone, PartialEq, Eq)]
pub struct Database {
    client: DataMcFlyClient,
    name: String,
}

impl Database {
    pub(crate) fn new(client: DataMcFlyClient, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &DataMcFlyClient {
        &self.client
    }

    /// Handle for the named collection in this database
    pub fn collection(&self, name: impl Into<String>) -> Collection {
        Collection::new(self.clone(), name)
    }

    fn request(&self) -> &dyn Transport {
        self.client.request()
    }

    pub async fn collection_names(&self) -> Result<Vec<String>> {
        self.request().list_collections(&self.name).await
    }

    /// Run a database or collection level command
    pub async fn command(&self, command: Value) -> Result<Value> {
        self.request().run_command(&self.name, command).await
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Database({:?}, {})", self.client, Quoted(&self.name))
    }
}
