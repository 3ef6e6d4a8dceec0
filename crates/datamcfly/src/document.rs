//! Document handles

use std::fmt;

use datamcfly_core::{Result, Transport};
use serde_json::Value;

use crate::client::Quoted;
use crate::collection::Collection;

/// A single document addressed by id
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    collection: Collection,
    id: String,
}

impl Document {
    pub(crate) fn new(collection: Collection, id: impl Into<String>) -> Self {
        Self {
            collection,
            id: id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    fn request(&self) -> &dyn Transport {
        self.collection.database().client().request()
    }

    fn db(&self) -> &str {
        self.collection.database().name()
    }

    pub async fn get(&self) -> Result<Value> {
        self.request()
            .view_document(self.db(), self.collection.name(), &self.id)
            .await
    }

    pub async fn update(&self, update: Value) -> Result<Value> {
        self.request()
            .update_document(self.db(), self.collection.name(), &self.id, update)
            .await
    }

    pub async fn delete(&self) -> Result<Value> {
        self.request()
            .delete_document(self.db(), self.collection.name(), &self.id)
            .await
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Document({:?}, {})", self.collection, Quoted(&self.id))
    }
}
