// File: ./src/tui/state.rs
// Terminal view state wrapped around the board
use crate::board::{BoardState, Outcome};
use crate::model::TaskId;
use chrono::NaiveDate;
use ratatui::widgets::ListState;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Searching,
    Form,
    ConfirmDelete,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FormField {
    Title,
    Description,
    DueDate,
    Status,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::DueDate,
            FormField::DueDate => FormField::Status,
            FormField::Status => FormField::Title,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FormField::Title => FormField::Status,
            FormField::Description => FormField::Title,
            FormField::DueDate => FormField::Description,
            FormField::Status => FormField::DueDate,
        }
    }
}

pub const MENU_ITEMS: [&str; 3] = ["Dashboard", "Profile", "Settings"];

pub struct AppState {
    pub board: BoardState,
    pub list_state: ListState,
    pub mode: InputMode,
    pub field: FormField,
    pub show_sidebar: bool,
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(today: NaiveDate) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            board: BoardState::new(),
            list_state,
            mode: InputMode::Normal,
            field: FormField::Title,
            show_sidebar: true,
            today,
        }
    }

    /// Overdue is judged against this day; the UI loop moves it forward
    /// when the clock crosses midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn visible_len(&self) -> usize {
        self.board.visible(self.today).len()
    }

    /// Id of the highlighted row in the filtered list.
    pub fn selected_id(&self) -> Option<TaskId> {
        let idx = self.list_state.selected()?;
        self.board
            .visible(self.today)
            .get(idx)
            .map(|v| v.task.id.clone())
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Keeps the highlight inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        let sel = self.list_state.selected().unwrap_or(0);
        if len == 0 {
            self.list_state.select(Some(0));
        } else if sel >= len {
            self.list_state.select(Some(len - 1));
        }
    }

    /// Text buffer behind the focused form field. The status field has none.
    pub fn field_buffer_mut(&mut self) -> Option<&mut String> {
        let form = &mut self.board.form;
        match self.field {
            FormField::Title => Some(&mut form.title),
            FormField::Description => Some(&mut form.description),
            FormField::DueDate => Some(&mut form.due_date),
            FormField::Status => None,
        }
    }

    pub fn apply(&mut self, outcome: Outcome) {
        self.board.apply(outcome);
        if self.mode == InputMode::Form && !self.board.form_open {
            self.mode = InputMode::Normal;
        }
        if self.mode == InputMode::ConfirmDelete && self.board.delete_id.is_none() {
            self.mode = InputMode::Normal;
        }
        self.clamp_selection();
    }
}
