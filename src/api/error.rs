// File: ./src/api/error.rs
// Service errors. Every failure leaves as {"error": "<message>"}; backend
// failures are logged here and replaced with a generic message.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

pub const MISSING_FIELDS: &str = "Title and due_date are required.";
pub const TASK_NOT_FOUND: &str = "Task not found";
pub const SERVER_ERROR: &str = "Server error";
pub const STORE_REJECTED: &str = "Task store rejected the request";

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Task not found")]
    NotFound,

    #[error("Server error")]
    Internal,
}

impl ApiError {
    pub fn missing_fields() -> Self {
        Self::BadRequest(MISSING_FIELDS.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mapping for create/update/delete: validation text is passed through,
    /// backend failures become a generic 400.
    pub fn from_mutation(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => Self::BadRequest(e.to_string()),
            StoreError::NotFound(_) => Self::NotFound,
            other => {
                tracing::error!(error = %other, "task store failed during a write");
                Self::BadRequest(STORE_REJECTED.to_string())
            }
        }
    }

    /// Mapping for the list operation: any store failure is a 500.
    pub fn from_read(err: StoreError) -> Self {
        tracing::error!(error = %err, "task store failed during list");
        Self::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
