//! CV and event endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::Value;

use super::{created, deleted, success, ApiResult};
use crate::errors::AppError;
use crate::service::{Record, RecordService};

/// GET /api/{cvs,events}/{email} - List records owned by an email.
pub async fn list_records<R: Record>(
    State(service): State<RecordService<R>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Vec<R>> {
    let Path(email) = path.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let records = service.list_by_owner(&email).await?;

    tracing::debug!("Found {} {} for {}", records.len(), R::NOUN_PLURAL, email);
    success(
        format!("{} retrieved successfully", capitalize(R::NOUN_PLURAL)),
        records,
    )
}

/// POST /api/{cvs,events} - Validate and store a new record.
pub async fn create_record<R: Record>(
    State(service): State<RecordService<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<R> {
    let Json(payload) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    match service.create(&payload).await {
        Ok(record) => created(format!("{} added successfully", capitalize(R::NOUN)), record),
        Err(AppError::Validation(errors)) => {
            tracing::debug!("Rejected {}: {}", R::NOUN, errors);
            Err(AppError::Validation(errors))
        }
        Err(e) => Err(e),
    }
}

/// DELETE /api/{cvs,events}/{email} - Delete every record owned by an email.
pub async fn delete_records<R: Record>(
    State(service): State<RecordService<R>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<()> {
    let Path(email) = path.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let count = service.delete_by_owner(&email).await?;

    deleted(format!("{} {}(s) deleted successfully", count, R::NOUN), count)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
