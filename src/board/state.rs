// File: ./src/board/state.rs
// List, filter, form and delete state; reconciles request outcomes
use crate::board::form::{FormErrors, TaskForm};
use crate::board::request::{Outcome, Request};
use crate::model::{Task, TaskId, TaskStatus};
use chrono::NaiveDate;

pub const FETCH_FAILED: &str = "Failed to fetch tasks.";
pub const ADD_FAILED: &str = "Failed to add task";
pub const UPDATE_FAILED: &str = "Failed to update task";
pub const DELETE_FAILED: &str = "Failed to delete task";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Statuses",
            StatusFilter::Only(status) => status.label(),
        }
    }

    /// All -> Pending -> In Progress -> Completed -> All
    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(TaskStatus::Pending),
            StatusFilter::Only(TaskStatus::Completed) => StatusFilter::All,
            StatusFilter::Only(status) => StatusFilter::Only(status.next()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTask<'a> {
    pub task: &'a Task,
    pub overdue: bool,
}

/// Local mirror of the task collection plus everything the list and form
/// screens need. It never does I/O: it emits [`Request`]s and absorbs
/// [`Outcome`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub edit_id: Option<TaskId>,
    pub delete_id: Option<TaskId>,
    pub form: TaskForm,
    pub form_open: bool,
    pub errors: FormErrors,
    pub filter: StatusFilter,
    pub search: String,
    pub error: Option<String>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            tasks: vec![],
            loading: true,
            edit_id: None,
            delete_id: None,
            form: TaskForm::default(),
            form_open: false,
            errors: FormErrors::default(),
            filter: StatusFilter::All,
            search: String::new(),
            error: None,
        }
    }

    /// Initial activation: fetch the whole list.
    pub fn load(&mut self) -> Request {
        self.loading = true;
        Request::Load
    }

    /// Tasks passing both the status filter and the title search, in
    /// collection order, with their overdue flag for `today`.
    pub fn visible(&self, today: NaiveDate) -> Vec<VisibleTask<'_>> {
        let query = self.search.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t.status))
            .filter(|t| t.title.to_lowercase().contains(&query))
            .map(|task| VisibleTask {
                task,
                overdue: task.is_overdue(today),
            })
            .collect()
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn open_add(&mut self) {
        self.form = TaskForm::default();
        self.edit_id = None;
        self.errors = FormErrors::default();
        self.form_open = true;
    }

    /// Seeds the form from the task. Returns false if the id is unknown.
    pub fn open_edit(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.task(id) else {
            return false;
        };
        self.form = TaskForm::from_task(task);
        self.edit_id = Some(id.clone());
        self.errors = FormErrors::default();
        self.form_open = true;
        true
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
        self.errors = FormErrors::default();
        self.edit_id = None;
    }

    /// Validates the draft. Invalid drafts only update the field errors and
    /// produce no request.
    pub fn submit(&mut self) -> Option<Request> {
        let errors = self.form.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors = FormErrors::default();
        self.error = None;
        let payload = self.form.to_payload();
        Some(match &self.edit_id {
            Some(id) => Request::Update(id.clone(), payload),
            None => Request::Create(payload),
        })
    }

    /// Stages a delete; nothing is sent until [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, id: &TaskId) {
        self.delete_id = Some(id.clone());
    }

    pub fn cancel_delete(&mut self) {
        self.delete_id = None;
    }

    pub fn confirm_delete(&mut self) -> Option<Request> {
        let id = self.delete_id.clone()?;
        self.error = None;
        Some(Request::Delete(id))
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Loaded(res) => {
                self.loading = false;
                match res {
                    Ok(tasks) => self.tasks = tasks,
                    Err(e) => {
                        tracing::warn!(error = %e, "task list fetch failed");
                        self.error = Some(FETCH_FAILED.to_string());
                    }
                }
            }
            Outcome::Created(Ok(task)) => {
                self.tasks.push(task);
                self.reset_form();
            }
            Outcome::Created(Err(e)) => {
                tracing::warn!(error = %e, "task create failed");
                let message = e.server_message().unwrap_or(ADD_FAILED);
                self.error = Some(message.to_string());
            }
            Outcome::Updated(id, Ok(updated)) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = updated;
                }
                self.reset_form();
            }
            Outcome::Updated(id, Err(e)) => {
                tracing::warn!(%id, error = %e, "task update failed");
                self.error = Some(UPDATE_FAILED.to_string());
            }
            Outcome::Deleted(id, Ok(())) => {
                self.tasks.retain(|t| t.id != id);
                if self.delete_id.as_ref() == Some(&id) {
                    self.delete_id = None;
                }
            }
            Outcome::Deleted(id, Err(e)) => {
                // Pending id stays set so the confirmation can be retried.
                tracing::warn!(%id, error = %e, "task delete failed");
                self.error = Some(DELETE_FAILED.to_string());
            }
        }
    }

    fn reset_form(&mut self) {
        self.form = TaskForm::default();
        self.errors = FormErrors::default();
        self.form_open = false;
        self.edit_id = None;
    }
}
