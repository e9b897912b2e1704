// File: ./src/api/handlers.rs
// HTTP handlers: presence check, typed conversion, one store call each
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::ApiError;
use crate::model::{Task, TaskFields, TaskId, TaskPayload};

/// Confirmation body for deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /api/tasks`
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.list().await.map_err(ApiError::from_read)?;
    Ok(Json(tasks))
}

/// `POST /api/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let fields = validate_payload(&read_body(body)?)?;
    let task = state
        .store
        .insert(fields)
        .await
        .map_err(ApiError::from_mutation)?;
    tracing::info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /api/tasks/{id}`
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let fields = validate_payload(&read_body(body)?)?;
    let id = TaskId::from(id);
    let task = state
        .store
        .replace(&id, fields)
        .await
        .map_err(ApiError::from_mutation)?;
    tracing::info!(%id, "task updated");
    Ok(Json(task))
}

/// `DELETE /api/tasks/{id}`
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = TaskId::from(id);
    state
        .store
        .delete(&id)
        .await
        .map_err(ApiError::from_mutation)?;
    tracing::info!(%id, "task deleted");
    Ok(Json(MessageBody {
        message: "Task deleted".to_string(),
    }))
}

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// A body that is not a readable `TaskPayload` (wrong content type, bad
/// JSON, wrong field types) carries no usable fields, so it gets the same
/// JSON 400 as a payload with the fields missing.
fn read_body(body: Result<Json<TaskPayload>, JsonRejection>) -> Result<TaskPayload, ApiError> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        tracing::warn!(error = %rejection, "rejected unreadable task body");
        ApiError::missing_fields()
    })
}

/// Presence check first (the store is never touched when it fails), then
/// the typed conversion.
fn validate_payload(payload: &TaskPayload) -> Result<TaskFields, ApiError> {
    if !payload.has_required_fields() {
        tracing::warn!("rejected task payload without title or due_date");
        return Err(ApiError::missing_fields());
    }
    TaskFields::try_from(payload).map_err(|e| {
        tracing::warn!(error = %e, "rejected invalid task payload");
        ApiError::BadRequest(e.to_string())
    })
}
