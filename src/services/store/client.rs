//! Document store interface used by the repositories.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer errors.
///
/// Kept independent from `AppError`; repos decide what each one means for the API.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document already exists: {collection}/{id}")]
    Conflict { collection: String, id: String },
    #[error("document data must be a JSON object")]
    InvalidDocument,
    #[error("store backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// A stored document: an id, a JSON object body and bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A minimal document-database interface.
///
/// Intentionally narrow: collections of JSON objects addressed by string ids.
/// Implementations must be shareable across requests (`Arc<dyn DocumentStore>`).
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Newest first, at most `limit` documents.
    async fn list(&self, collection: &str, limit: u32) -> StoreResult<Vec<Document>>;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    // Insert a new document. A random UUID is used when `id` is None.
    //
    // Returns `StoreError::Conflict` if the id is already taken.
    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Value,
    ) -> StoreResult<Document>;

    // Shallow-merge `patch` into the stored object. `Ok(None)` if the id is unknown.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> StoreResult<Option<Document>>;

    // Remove and return the document. `Ok(None)` if the id is unknown.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;
}

pub(crate) fn ensure_object(data: &Value) -> StoreResult<()> {
    if data.is_object() {
        Ok(())
    } else {
        Err(StoreError::InvalidDocument)
    }
}

pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
