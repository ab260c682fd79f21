//! Record service: validate-then-persist and owner-scoped reads and deletes.
//!
//! One [`RecordService`] exists per record kind, each bound to its own
//! collection. Store failures are passed through untouched; there is no
//! retry and no rollback.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::db::{Document, DocumentStore, Filter, ID_FIELD};
use crate::errors::AppError;
use crate::models::{Cv, Event};
use crate::validation::{validate_cv, validate_event, ValidationErrors};

/// Field grouping records by owner.
pub const OWNER_FIELD: &str = "email";

/// A record kind with its schema and collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection holding this kind.
    const COLLECTION: &'static str;
    /// Singular noun used in messages ("CV").
    const NOUN: &'static str;
    /// Plural noun used in messages ("CVs").
    const NOUN_PLURAL: &'static str;

    fn validate(payload: &Value) -> Result<Self, ValidationErrors>;

    fn owner(&self) -> &str;
}

impl Record for Cv {
    const COLLECTION: &'static str = "cvs";
    const NOUN: &'static str = "CV";
    const NOUN_PLURAL: &'static str = "CVs";

    fn validate(payload: &Value) -> Result<Self, ValidationErrors> {
        validate_cv(payload)
    }

    fn owner(&self) -> &str {
        &self.email
    }
}

impl Record for Event {
    const COLLECTION: &'static str = "events";
    const NOUN: &'static str = "event";
    const NOUN_PLURAL: &'static str = "events";

    fn validate(payload: &Value) -> Result<Self, ValidationErrors> {
        validate_event(payload)
    }

    fn owner(&self) -> &str {
        &self.email
    }
}

/// Create, list and delete operations for one record kind.
pub struct RecordService<R> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

impl<R: Record> RecordService<R> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Validate `payload` and store it as a new document.
    ///
    /// Duplicate submissions are stored as separate documents.
    pub async fn create(&self, payload: &Value) -> Result<R, AppError> {
        let record = R::validate(payload)?;

        let document = to_document(&record)?;
        self.store.insert_one(R::COLLECTION, document).await?;

        tracing::info!(
            collection = R::COLLECTION,
            owner = record.owner(),
            "{} created",
            R::NOUN
        );
        Ok(record)
    }

    /// All records owned by `email`, without store identifiers.
    ///
    /// An empty result is reported as `NotFound`, not as an empty list.
    pub async fn list_by_owner(&self, email: &str) -> Result<Vec<R>, AppError> {
        let documents = self
            .store
            .find(R::COLLECTION, &Filter::equals(OWNER_FIELD, email))
            .await?;

        if documents.is_empty() {
            return Err(AppError::NotFound(format!("No {} found", R::NOUN_PLURAL)));
        }

        documents.into_iter().map(from_document::<R>).collect()
    }

    /// Delete every record owned by `email`, returning how many were removed.
    pub async fn delete_by_owner(&self, email: &str) -> Result<u64, AppError> {
        let deleted = self
            .store
            .delete_many(R::COLLECTION, &Filter::equals(OWNER_FIELD, email))
            .await?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "No {} found for the given email",
                R::NOUN_PLURAL
            )));
        }

        tracing::info!(
            collection = R::COLLECTION,
            owner = email,
            deleted,
            "{} deleted",
            R::NOUN_PLURAL
        );
        Ok(deleted)
    }
}

fn to_document<R: Record>(record: &R) -> Result<Document, AppError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(AppError::Internal(format!(
            "{} serialized to a non-object: {}",
            R::NOUN,
            other
        ))),
        Err(e) => Err(AppError::Internal(format!(
            "Failed to serialize {}: {}",
            R::NOUN,
            e
        ))),
    }
}

fn from_document<R: Record>(mut document: Document) -> Result<R, AppError> {
    document.remove(ID_FIELD);
    serde_json::from_value(Value::Object(document)).map_err(|e| {
        AppError::Internal(format!("Stored {} does not match schema: {}", R::NOUN, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, StoreError, StoreResult};
    use crate::models::{Direction, EventType, ExperienceLevel, Skill};
    use async_trait::async_trait;
    use serde_json::json;

    fn cv_payload(email: &str) -> Value {
        json!({
            "name": "John Doe",
            "email": email,
            "phone": "1234567890"
        })
    }

    fn event_payload(email: &str) -> Value {
        json!({
            "name": "Backend Internship",
            "description": "Summer position",
            "type": "vacancy",
            "direction": "backend",
            "skills": ["go", "python"],
            "experience_lvl": "junior",
            "email": email
        })
    }

    fn services() -> (Arc<MemoryStore>, RecordService<Cv>, RecordService<Event>) {
        let store = Arc::new(MemoryStore::new());
        let cvs = RecordService::new(store.clone());
        let events = RecordService::new(store.clone());
        (store, cvs, events)
    }

    /// Store whose every call fails, standing in for an unreachable database.
    struct UnreachableStore;

    #[async_trait]
    impl DocumentStore for UnreachableStore {
        async fn insert_one(&self, _: &str, _: Document) -> StoreResult<()> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn find(&self, _: &str, _: &Filter) -> StoreResult<Vec<Document>> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn delete_many(&self, _: &str, _: &Filter) -> StoreResult<u64> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_cv_round_trip() {
        let (_, cvs, _) = services();

        let created = cvs.create(&cv_payload("john@example.com")).await.unwrap();
        let listed = cvs.list_by_owner("john@example.com").await.unwrap();

        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_listing_strips_store_id() {
        let (store, cvs, _) = services();
        cvs.create(&cv_payload("john@example.com")).await.unwrap();

        let raw = store
            .find(Cv::COLLECTION, &Filter::equals(OWNER_FIELD, "john@example.com"))
            .await
            .unwrap();
        assert!(raw[0].contains_key(ID_FIELD));

        let listed = cvs.list_by_owner("john@example.com").await.unwrap();
        let json = serde_json::to_value(&listed[0]).unwrap();
        assert!(json.get(ID_FIELD).is_none());
    }

    #[tokio::test]
    async fn test_invalid_payload_is_not_stored() {
        let (store, cvs, events) = services();

        let err = cvs.create(&cv_payload("invalid_email")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut payload = event_payload("john@example.com");
        payload["type"] = json!("invalid_type");
        let err = events.create(&payload).await.unwrap_err();
        match err {
            AppError::Validation(errors) => assert!(errors.has_field("type")),
            other => panic!("expected validation error, got {other}"),
        }

        assert_eq!(store.count(Cv::COLLECTION).await, 0);
        assert_eq!(store.count(Event::COLLECTION).await, 0);
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let (_, cvs, _) = services();
        cvs.create(&cv_payload("john@example.com")).await.unwrap();
        cvs.create(&cv_payload("john@example.com")).await.unwrap();

        let listed = cvs.list_by_owner("john@example.com").await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_owner_is_not_found() {
        let (_, cvs, events) = services();
        cvs.create(&cv_payload("someone@example.com")).await.unwrap();
        events
            .create(&event_payload("someone@example.com"))
            .await
            .unwrap();

        assert!(matches!(
            cvs.list_by_owner("john@example.com").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            cvs.delete_by_owner("john@example.com").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            events.list_by_owner("john@example.com").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            events.delete_by_owner("john@example.com").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_owner_records() {
        let (store, cvs, _) = services();
        for _ in 0..3 {
            cvs.create(&cv_payload("john@example.com")).await.unwrap();
        }
        cvs.create(&cv_payload("jane@example.com")).await.unwrap();

        assert_eq!(cvs.delete_by_owner("john@example.com").await.unwrap(), 3);
        assert!(matches!(
            cvs.list_by_owner("john@example.com").await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(store.count(Cv::COLLECTION).await, 1);
        assert_eq!(cvs.list_by_owner("jane@example.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_kinds_do_not_share_records() {
        let (_, cvs, events) = services();
        cvs.create(&cv_payload("john@example.com")).await.unwrap();
        let event = events
            .create(&event_payload("john@example.com"))
            .await
            .unwrap();

        assert_eq!(event.event_type, EventType::Vacancy);
        assert_eq!(event.direction, Direction::Backend);
        assert_eq!(event.skills, vec![Skill::Go, Skill::Python]);
        assert_eq!(event.experience_lvl, ExperienceLevel::Junior);

        assert_eq!(events.delete_by_owner("john@example.com").await.unwrap(), 1);
        assert_eq!(cvs.list_by_owner("john@example.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let cvs: RecordService<Cv> = RecordService::new(Arc::new(UnreachableStore));

        assert!(matches!(
            cvs.create(&cv_payload("john@example.com")).await,
            Err(AppError::Store(_))
        ));
        assert!(matches!(
            cvs.list_by_owner("john@example.com").await,
            Err(AppError::Store(_))
        ));
        assert!(matches!(
            cvs.delete_by_owner("john@example.com").await,
            Err(AppError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_validation_precedes_store_access() {
        let cvs: RecordService<Cv> = RecordService::new(Arc::new(UnreachableStore));
        assert!(matches!(
            cvs.create(&json!({})).await,
            Err(AppError::Validation(_))
        ));
    }
}
