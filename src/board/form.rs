// File: ./src/board/form.rs
// Add/edit form draft and its field checks
use crate::model::{Task, TaskPayload, TaskStatus};

pub const TITLE_REQUIRED: &str = "Title is required.";
pub const DUE_DATE_REQUIRED: &str = "Due date is required.";

/// Add/edit form draft. `due_date` holds the `YYYY-MM-DD` text as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub title: Option<String>,
    pub due_date: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.due_date.is_none()
    }
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date_input(),
            status: task.status,
        }
    }

    pub fn validate(&self) -> FormErrors {
        FormErrors {
            title: self
                .title
                .trim()
                .is_empty()
                .then(|| TITLE_REQUIRED.to_string()),
            due_date: self
                .due_date
                .is_empty()
                .then(|| DUE_DATE_REQUIRED.to_string()),
        }
    }

    /// All four fields are always sent; the service does the rest.
    pub fn to_payload(&self) -> TaskPayload {
        TaskPayload {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            due_date: Some(self.due_date.clone()),
            status: Some(self.status.as_str().to_string()),
        }
    }
}
