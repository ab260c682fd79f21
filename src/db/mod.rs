//! Document store module.
//!
//! Records are persisted as JSON documents grouped into named collections.
//! Handlers only see the narrow [`DocumentStore`] interface; SQLite is the
//! production backend and an in-memory store serves tests and `memory:` URLs.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A stored JSON object.
pub type Document = Map<String, Value>;

/// Field carrying the store-assigned identifier on documents returned by `find`.
pub const ID_FIELD: &str = "_id";

/// Connection string scheme selecting [`MemoryStore`].
pub const MEMORY_SCHEME: &str = "memory:";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt document: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Unsupported connection string: {0}")]
    UnsupportedUrl(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Conjunction of exact-match conditions on top-level string fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching documents whose `field` equals `value`.
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().and_equals(field, value)
    }

    pub fn and_equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }

    /// Whether `document` satisfies every clause. An empty filter matches everything.
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses.iter().all(|(field, expected)| {
            document.get(field).and_then(Value::as_str) == Some(expected.as_str())
        })
    }
}

/// Collection-level persistence primitives.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document; the store assigns its identifier.
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<()>;

    /// All documents matching `filter`, in insertion order, each carrying [`ID_FIELD`].
    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>>;

    /// Delete all documents matching `filter` in one operation, returning how many were removed.
    async fn delete_many(&self, collection: &str, filter: &Filter) -> StoreResult<u64>;
}

/// Open the store named by a connection string.
pub async fn connect(url: &str) -> StoreResult<Arc<dyn DocumentStore>> {
    if url.starts_with(MEMORY_SCHEME) {
        tracing::warn!("Using in-memory document store; data is lost on shutdown");
        return Ok(Arc::new(MemoryStore::new()));
    }
    if url.starts_with("sqlite:") {
        let store = SqliteStore::connect(url).await?;
        return Ok(Arc::new(store));
    }
    Err(StoreError::UnsupportedUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_filter_matches_exact_value() {
        let filter = Filter::equals("email", "john@example.com");
        assert!(filter.matches(&doc(json!({ "email": "john@example.com", "name": "J" }))));
        assert!(!filter.matches(&doc(json!({ "email": "John@example.com" }))));
        assert!(!filter.matches(&doc(json!({ "name": "J" }))));
        assert!(!filter.matches(&doc(json!({ "email": 5 }))));
    }

    #[test]
    fn test_filter_conjunction() {
        let filter = Filter::equals("email", "a@b.co").and_equals("name", "x");
        assert_eq!(filter.clauses().len(), 2);
        assert!(filter.matches(&doc(json!({ "email": "a@b.co", "name": "x" }))));
        assert!(!filter.matches(&doc(json!({ "email": "a@b.co", "name": "y" }))));
        assert!(Filter::new().matches(&doc(json!({}))));
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let result = connect("mongodb://localhost:27017").await;
        assert!(matches!(result, Err(StoreError::UnsupportedUrl(_))));
    }

    #[tokio::test]
    async fn test_connect_memory() {
        let store = connect("memory:").await.unwrap();
        store
            .insert_one("cvs", doc(json!({ "email": "a@b.co" })))
            .await
            .unwrap();
        let found = store.find("cvs", &Filter::equals("email", "a@b.co")).await.unwrap();
        assert_eq!(found.len(), 1);
    }
}
