//! REST API module.
//!
//! Handlers are generic over the record kind; `main` mounts one set per kind.

mod records;

pub use records::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    pub code: StatusCode,
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<u64>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(code: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            status: "success",
            message: message.into(),
            data,
            deleted_count: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// 200 response carrying `data`.
pub fn success<T: Serialize>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(StatusCode::OK, message, Some(data)))
}

/// 201 response echoing the stored record.
pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(StatusCode::CREATED, message, Some(data)))
}

/// 200 response reporting how many records were removed.
pub fn deleted(message: impl Into<String>, count: u64) -> ApiResult<()> {
    let mut response = ApiResponse::new(StatusCode::OK, message, None);
    response.deleted_count = Some(count);
    Ok(response)
}
