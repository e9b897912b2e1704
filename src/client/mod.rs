// File: ./src/client/mod.rs
// re-exports the client modules
pub mod cert;
pub mod core;

pub use self::core::{ClientError, TASKS_PATH, TaskApi, TaskHttpClient};
