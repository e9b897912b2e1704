// File: ./src/store/mod.rs
// The task document collection: trait, errors and backends
pub mod collection;
pub mod file;
pub mod memory;

use crate::model::{Task, TaskFields, TaskId, ValidationError};
use async_trait::async_trait;
use thiserror::Error;

pub use self::collection::TaskCollection;
pub use self::file::JsonFileStore;
pub use self::memory::MemoryTaskStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("task {0} not found")]
    NotFound(TaskId),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

/// Persistent collection of tasks keyed by id.
///
/// Every method acts on a single document; implementations make each call
/// atomic with respect to the others.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Full collection, no filtering.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Validates, assigns a fresh id, applies defaults and stores the task.
    async fn insert(&self, fields: TaskFields) -> Result<Task, StoreError>;

    /// Replaces the task with `id`. Never creates a new record.
    async fn replace(&self, id: &TaskId, fields: TaskFields) -> Result<Task, StoreError>;

    /// Removes the task with `id` and returns it.
    async fn delete(&self, id: &TaskId) -> Result<Task, StoreError>;
}
