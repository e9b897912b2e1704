// File: ./src/store/file.rs
// JSON document backend: locked read-modify-write per call
use crate::model::{Task, TaskFields, TaskId};
use crate::storage::LocalStorage;
use crate::store::{StoreError, TaskCollection, TaskStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The collection as one JSON array on disk. Each operation is a locked
/// read-modify-write, so separate processes sharing the file stay consistent.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: Arc<PathBuf>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `op` against the loaded collection on the blocking pool, saving
    /// the result when `write` is set and `op` succeeded.
    async fn transact<T, F>(&self, write: bool, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut TaskCollection) -> Result<T, StoreError> + Send + 'static,
    {
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || {
            LocalStorage::with_lock(&path, || {
                let mut collection = TaskCollection::new(LocalStorage::load(&path)?);
                let out = op(&mut collection)?;
                if write {
                    LocalStorage::save(&path, collection.tasks())?;
                }
                Ok(out)
            })
        })
        .await
        .map_err(|e| StoreError::Backend(format!("store worker failed: {}", e)))?
    }
}

#[async_trait]
impl TaskStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.transact(false, |c| Ok(c.tasks().to_vec())).await
    }

    async fn insert(&self, fields: TaskFields) -> Result<Task, StoreError> {
        self.transact(true, move |c| c.insert(fields)).await
    }

    async fn replace(&self, id: &TaskId, fields: TaskFields) -> Result<Task, StoreError> {
        let id = id.clone();
        self.transact(true, move |c| c.replace(&id, fields)).await
    }

    async fn delete(&self, id: &TaskId) -> Result<Task, StoreError> {
        let id = id.clone();
        self.transact(true, move |c| c.remove(&id)).await
    }
}
