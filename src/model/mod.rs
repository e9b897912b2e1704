// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod adapter;
pub mod item;

pub use item::{Task, TaskFields, TaskId, TaskPayload, TaskStatus, ValidationError};
