// File: ./src/tui/input.rs
// Key handling. Pure: mutates AppState and says what the actor should do.
use crate::tui::action::Action;
use crate::tui::state::{AppState, FormField, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match state.mode {
        InputMode::Normal => normal(state, key),
        InputMode::Searching => {
            searching(state, key);
            None
        }
        InputMode::Form => form(state, key),
        InputMode::ConfirmDelete => confirm_delete(state, key),
    }
}

fn normal(state: &mut AppState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('r') => return Some(Action::Dispatch(state.board.load())),
        KeyCode::Char('/') => state.mode = InputMode::Searching,
        KeyCode::Char('f') => {
            state.board.filter = state.board.filter.next();
            state.clamp_selection();
        }
        KeyCode::Char('m') => state.show_sidebar = !state.show_sidebar,
        KeyCode::Char('a') => {
            state.board.open_add();
            state.field = FormField::Title;
            state.mode = InputMode::Form;
        }
        KeyCode::Char('e') => {
            if let Some(id) = state.selected_id()
                && state.board.open_edit(&id)
            {
                state.field = FormField::Title;
                state.mode = InputMode::Form;
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = state.selected_id() {
                state.board.request_delete(&id);
                state.mode = InputMode::ConfirmDelete;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => state.next(),
        KeyCode::Up | KeyCode::Char('k') => state.previous(),
        _ => {}
    }
    None
}

fn searching(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => state.mode = InputMode::Normal,
        KeyCode::Esc => {
            state.board.search.clear();
            state.mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.board.search.pop();
        }
        KeyCode::Char(c) => state.board.search.push(c),
        _ => {}
    }
    state.clamp_selection();
}

fn form(state: &mut AppState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => {
            state.board.close_form();
            state.mode = InputMode::Normal;
        }
        KeyCode::Enter => return state.board.submit().map(Action::Dispatch),
        KeyCode::Tab | KeyCode::Down => state.field = state.field.next(),
        KeyCode::BackTab | KeyCode::Up => state.field = state.field.previous(),
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if state.field == FormField::Status =>
        {
            state.board.form.status = state.board.form.status.next();
        }
        KeyCode::Backspace => {
            if let Some(buf) = state.field_buffer_mut() {
                buf.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buf) = state.field_buffer_mut() {
                buf.push(c);
            }
        }
        _ => {}
    }
    None
}

fn confirm_delete(state: &mut AppState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => state.board.confirm_delete().map(Action::Dispatch),
        KeyCode::Char('n') | KeyCode::Esc => {
            state.board.cancel_delete();
            state.mode = InputMode::Normal;
            None
        }
        _ => None,
    }
}
