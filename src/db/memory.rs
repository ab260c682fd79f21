//! In-process document store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, Filter, StoreResult, ID_FIELD};

#[derive(Default)]
struct Collections {
    next_id: i64,
    documents: HashMap<String, Vec<(i64, Document)>>,
}

/// Document store backed by process memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Number of documents currently held in `collection`.
    pub(crate) async fn count(&self, collection: &str) -> usize {
        let inner = self.inner.read().await;
        inner.documents.get(collection).map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .documents
            .entry(collection.to_string())
            .or_default()
            .push((id, document));
        Ok(())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>> {
        let inner = self.inner.read().await;
        let Some(documents) = inner.documents.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|(_, document)| filter.matches(document))
            .map(|(id, document)| {
                let mut document = document.clone();
                document.insert(ID_FIELD.to_string(), Value::from(*id));
                document
            })
            .collect())
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let Some(documents) = inner.documents.get_mut(collection) else {
            return Ok(0);
        };

        let before = documents.len();
        documents.retain(|(_, document)| !filter.matches(document));
        Ok((before - documents.len()) as u64)
    }
}
