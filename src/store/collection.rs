// File: ./src/store/collection.rs
// Pure insert/replace/remove semantics shared by both backends
use crate::model::{Task, TaskFields, TaskId};
use crate::store::StoreError;

/// In-memory view of the document collection. Both backends run their
/// operations through this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn insert(&mut self, fields: TaskFields) -> Result<Task, StoreError> {
        fields.validate()?;
        let mut id = TaskId::generate();
        while self.position(&id).is_some() {
            id = TaskId::generate();
        }
        let task = Task {
            id,
            title: fields.title,
            description: fields.description.unwrap_or_default(),
            due_date: fields.due_date,
            status: fields.status.unwrap_or_default(),
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub fn replace(&mut self, id: &TaskId, fields: TaskFields) -> Result<Task, StoreError> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        fields.validate()?;

        let task = &mut self.tasks[idx];
        task.title = fields.title;
        task.due_date = fields.due_date;
        if let Some(description) = fields.description {
            task.description = description;
        }
        if let Some(status) = fields.status {
            task.status = status;
        }
        Ok(task.clone())
    }

    pub fn remove(&mut self, id: &TaskId) -> Result<Task, StoreError> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(self.tasks.remove(idx))
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskStatus, ValidationError};
    use chrono::{TimeZone, Utc};

    fn fields(title: &str) -> TaskFields {
        TaskFields {
            title: title.to_string(),
            description: None,
            due_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            status: None,
        }
    }

    #[test]
    fn insert_applies_defaults_and_unique_ids() {
        let mut collection = TaskCollection::default();
        let a = collection.insert(fields("a")).unwrap();
        let b = collection.insert(fields("b")).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.status, TaskStatus::Pending);
        assert_eq!(a.description, "");
        assert_eq!(collection.tasks().len(), 2);
    }

    #[test]
    fn insert_rejects_blank_title_without_storing() {
        let mut collection = TaskCollection::default();
        let err = collection.insert(fields("")).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::Missing("title"))
        ));
        assert!(collection.tasks().is_empty());
    }

    #[test]
    fn replace_keeps_omitted_optionals() {
        let mut collection = TaskCollection::default();
        let mut first = fields("a");
        first.description = Some("details".to_string());
        first.status = Some(TaskStatus::InProgress);
        let task = collection.insert(first).unwrap();

        let updated = collection.replace(&task.id, fields("renamed")).unwrap();

        assert_eq!(updated.id, task.id);
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.description, "details");
        assert_eq!(updated.status, TaskStatus::InProgress);
    }

    #[test]
    fn replace_unknown_id_is_not_an_upsert() {
        let mut collection = TaskCollection::default();
        let err = collection
            .replace(&TaskId::from("missing"), fields("x"))
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(collection.tasks().is_empty());
    }

    #[test]
    fn replace_unknown_id_reports_not_found_before_validation() {
        let mut collection = TaskCollection::default();
        let err = collection
            .replace(&TaskId::from("missing"), fields(""))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut collection = TaskCollection::default();
        collection.insert(fields("keep")).unwrap();

        assert!(matches!(
            collection.remove(&TaskId::from("missing")),
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(collection.tasks().len(), 1);
    }
}
