// File: ./src/api/mod.rs
// The task HTTP service
//   GET    /api/tasks       list_tasks
//   POST   /api/tasks       create_task
//   PUT    /api/tasks/{id}  update_task
//   DELETE /api/tasks/{id}  delete_task
//   GET    /health          health_check
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::TaskStore;

pub use error::{ApiError, ErrorBody};
pub use handlers::{
    HealthResponse, MessageBody, create_task, delete_task, health_check, list_tasks, update_task,
};

/// Shared handler state: only the store handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
