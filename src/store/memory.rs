// File: ./src/store/memory.rs
// Process-local backend
use crate::model::{Task, TaskFields, TaskId};
use crate::store::{StoreError, TaskCollection, TaskStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    collection: RwLock<TaskCollection>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.collection.read().await.tasks().to_vec())
    }

    async fn insert(&self, fields: TaskFields) -> Result<Task, StoreError> {
        self.collection.write().await.insert(fields)
    }

    async fn replace(&self, id: &TaskId, fields: TaskFields) -> Result<Task, StoreError> {
        self.collection.write().await.replace(id, fields)
    }

    async fn delete(&self, id: &TaskId) -> Result<Task, StoreError> {
        self.collection.write().await.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn delete_makes_id_unresolvable() {
        let store = MemoryTaskStore::new();
        let task = store
            .insert(TaskFields {
                title: "Take out bins".to_string(),
                description: None,
                due_date: Utc::now(),
                status: None,
            })
            .await
            .unwrap();

        store.delete(&task.id).await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
        assert!(matches!(
            store.delete(&task.id).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
