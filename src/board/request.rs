// File: ./src/board/request.rs
// Network calls the board asks for, and their results
use crate::client::{ClientError, TaskApi};
use crate::model::{Task, TaskId, TaskPayload};

/// A network call the board wants made.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Load,
    Create(TaskPayload),
    Update(TaskId, TaskPayload),
    Delete(TaskId),
}

/// The settled result of a [`Request`], fed back into `BoardState::apply`.
#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<Vec<Task>, ClientError>),
    Created(Result<Task, ClientError>),
    Updated(TaskId, Result<Task, ClientError>),
    Deleted(TaskId, Result<(), ClientError>),
}

impl Request {
    /// Performs the call once. No retries, no timeout.
    pub async fn execute(self, api: &dyn TaskApi) -> Outcome {
        match self {
            Request::Load => Outcome::Loaded(api.list_tasks().await),
            Request::Create(payload) => Outcome::Created(api.create_task(&payload).await),
            Request::Update(id, payload) => {
                let res = api.update_task(&id, &payload).await;
                Outcome::Updated(id, res)
            }
            Request::Delete(id) => {
                let res = api.delete_task(&id).await;
                Outcome::Deleted(id, res)
            }
        }
    }
}
