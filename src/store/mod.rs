// External document store seam.
//
// All persisted state lives in named, schema-less collections (`users`,
// `projects`, `tasks`) on the external store. Each operation below is a single
// independent network call; there are no transactions spanning calls.

pub mod firestore;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// A stored record: its store-assigned id plus its schema-less fields.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store error: {0}")]
    Backend(String),

    #[error("document store transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by id; `None` if it does not exist.
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Create a document with a store-assigned id; returns that id.
    async fn add_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<String, StoreError>;

    /// Create or replace a document under a caller-chosen id.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Equality query: all documents where `field == value`.
    async fn query_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;
}
