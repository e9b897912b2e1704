// File: ./src/tui/action.rs
// Messages between the UI loop and the network actor
use crate::board::{Outcome, Request};

/// UI -> network actor.
#[derive(Debug)]
pub enum Action {
    Dispatch(Request),
    Quit,
}

/// Network actor -> UI.
#[derive(Debug)]
pub enum AppEvent {
    Outcome(Outcome),
}
