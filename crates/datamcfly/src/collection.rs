//! Collection handles

use std::fmt;

use datamcfly_core::{Result, Transport};
use serde_json::Value;

use crate::client::Quoted;
use crate::database::Database;
use crate::document::Document;

/// A named collection inside a [`Database`]
#[derive(Clone, PartialEq, Eq)]
pub struct Collection {
    database: Database,
    name: String,
}

impl Collection {
    pub(crate) fn new(database: Database, name: impl Into<String>) -> Self {
        Self {
            database,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Handle for a single document by id
    pub fn document(&self, id: impl Into<String>) -> Document {
        Document::new(self.clone(), id)
    }

    fn request(&self) -> &dyn Transport {
        self.database.client().request()
    }

    /// All documents in the collection
    pub async fn find(&self) -> Result<Value> {
        self.request()
            .list_documents(self.database.name(), &self.name)
            .await
    }

    /// Insert a document or an array of documents
    pub async fn insert_many(&self, documents: Value) -> Result<Value> {
        self.request()
            .insert_documents(self.database.name(), &self.name, documents)
            .await
    }

    pub async fn update_many(&self, update: Value) -> Result<Value> {
        self.request()
            .update_documents(self.database.name(), &self.name, update)
            .await
    }

    /// Replace every document in the collection with `documents`
    pub async fn delete_replace_many(&self, documents: Value) -> Result<Value> {
        self.request()
            .delete_replace_documents(self.database.name(), &self.name, documents)
            .await
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collection({:?}, {})", self.database, Quoted(&self.name))
    }
}
