pub mod api;
pub mod board;
pub mod client;
pub mod config;
pub mod model;
pub mod storage;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;
