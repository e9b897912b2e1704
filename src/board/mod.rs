// File: ./src/board/mod.rs
// Client-side view state for the task list and its form
pub mod form;
pub mod request;
pub mod state;

pub use form::{FormErrors, TaskForm};
pub use request::{Outcome, Request};
pub use state::{BoardState, StatusFilter, VisibleTask};
