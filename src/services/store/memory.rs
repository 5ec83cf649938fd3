use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::services::store::client::{
    Document, DocumentStore, StoreError, StoreResult, ensure_object, new_document_id,
};

type Key = (String, String);

/// Process-local store for development and tests.
///
/// Data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<HashMap<Key, Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(collection: &str, id: &str) -> Key {
    (collection.to_string(), id.to_string())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, collection: &str, limit: u32) -> StoreResult<Vec<Document>> {
        let docs = self.docs.read().await;
        let mut out: Vec<Document> = docs
            .iter()
            .filter(|((c, _), _)| c == collection)
            .map(|(_, doc)| doc.clone())
            .collect();

        out.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        out.truncate(limit as usize);

        Ok(out)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self.docs.read().await.get(&key(collection, id)).cloned())
    }

    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Value,
    ) -> StoreResult<Document> {
        ensure_object(&data)?;

        let id = id.map(str::to_string).unwrap_or_else(new_document_id);
        let mut docs = self.docs.write().await;
        let k = key(collection, &id);
        if docs.contains_key(&k) {
            return Err(StoreError::Conflict {
                collection: collection.to_string(),
                id,
            });
        }

        let now = Utc::now();
        let doc = Document {
            id,
            data,
            created_at: now,
            updated_at: now,
        };
        docs.insert(k, doc.clone());

        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> StoreResult<Option<Document>> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::InvalidDocument);
        };

        let mut docs = self.docs.write().await;
        let Some(doc) = docs.get_mut(&key(collection, id)) else {
            return Ok(None);
        };

        if let Value::Object(fields) = &mut doc.data {
            fields.extend(patch);
        }
        doc.updated_at = Utc::now();

        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self.docs.write().await.remove(&key(collection, id)))
    }
}
