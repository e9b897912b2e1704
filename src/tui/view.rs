// File: ./src/tui/view.rs
// Rendering
use crate::model::TaskStatus;
use crate::tui::state::{AppState, FormField, InputMode, MENU_ITEMS};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    // --- Navbar ---
    let navbar = Paragraph::new(Line::from(Span::styled(
        "Task Manager",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().fg(Color::White).bg(Color::Blue))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(navbar, v_chunks[0]);

    let body = if state.show_sidebar {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(20), Constraint::Percentage(80)])
            .split(v_chunks[1]);

        // --- Sidebar ---
        let menu: Vec<ListItem> = MENU_ITEMS
            .iter()
            .map(|item| ListItem::new(Line::from(*item)))
            .collect();
        let sidebar = List::new(menu).block(Block::default().borders(Borders::ALL).title(" Menu "));
        f.render_widget(sidebar, h_chunks[0]);
        h_chunks[1]
    } else {
        v_chunks[1]
    };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(body);

    // --- Controls ---
    let search_style = if state.mode == InputMode::Searching {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let controls = Paragraph::new(Line::from(vec![
        Span::styled(format!("Search: {}", state.board.search), search_style),
        Span::raw("   "),
        Span::styled(
            format!("Status: {}", state.board.filter.label()),
            Style::default().fg(Color::Cyan),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Filter "));
    f.render_widget(controls, main_chunks[0]);
    if state.mode == InputMode::Searching {
        let x = main_chunks[0].x + 1 + "Search: ".len() as u16 + state.board.search.chars().count() as u16;
        f.set_cursor_position((x, main_chunks[0].y + 1));
    }

    // --- Task List ---
    let visible = state.board.visible(state.today);
    let title = if state.board.loading {
        " Tasks (Loading tasks...) ".to_string()
    } else {
        format!(" Tasks ({}) ", visible.len())
    };
    let task_items: Vec<ListItem> = visible
        .iter()
        .map(|v| {
            let t = v.task;
            let style = if v.overdue {
                Style::default().fg(Color::Red)
            } else if t.status == TaskStatus::Completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            let mut head = vec![
                Span::styled(format!("[{}] ", t.status.label()), style.add_modifier(Modifier::BOLD)),
                Span::styled(t.title.clone(), style),
                Span::styled(format!("  due {}", t.due_date_input()), style),
            ];
            if v.overdue {
                head.push(Span::styled(
                    " Overdue",
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            let mut lines = vec![Line::from(head)];
            if !t.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", t.description),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let task_list = List::new(task_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        );
    f.render_stateful_widget(task_list, main_chunks[1], &mut state.list_state);

    // --- Footer ---
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[2]);
    let (status_text, status_color) = match &state.board.error {
        Some(err) => (err.clone(), Color::Red),
        None if state.board.loading => ("Loading tasks...".to_string(), Color::Cyan),
        None => ("Ready".to_string(), Color::Cyan),
    };
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );
    let help_text = match state.mode {
        InputMode::Normal => "/:Find | f:Filter | a:Add | e:Edit | d:Del | m:Menu | q:Quit",
        InputMode::Searching => "Enter:Keep | Esc:Clear",
        InputMode::Form => "Tab:Next | Enter:Save | Esc:Close",
        InputMode::ConfirmDelete => "y:Delete | n:Cancel",
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);

    match state.mode {
        InputMode::Form => draw_form(f, state),
        InputMode::ConfirmDelete => draw_confirm(f, state),
        _ => {}
    }
}

fn draw_form(f: &mut Frame, state: &AppState) {
    let area = centered(f.area(), 60, 17);
    f.render_widget(Clear, area);
    let title = if state.board.edit_id.is_some() {
        " Edit Task "
    } else {
        " Add Task "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(inner);

    let form = &state.board.form;
    let fields = [
        (FormField::Title, "Title", form.title.as_str(), rows[0]),
        (FormField::Description, "Description", form.description.as_str(), rows[2]),
        (FormField::DueDate, "Due date (YYYY-MM-DD)", form.due_date.as_str(), rows[3]),
    ];
    for (field, label, value, rect) in fields {
        let focused = state.field == field;
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(value)
            .block(Block::default().borders(Borders::ALL).title(label).border_style(border));
        f.render_widget(input, rect);
        if focused {
            f.set_cursor_position((rect.x + 1 + value.chars().count() as u16, rect.y + 1));
        }
    }

    let error_line = |msg: &Option<String>| {
        Paragraph::new(msg.clone().unwrap_or_default()).style(Style::default().fg(Color::Red))
    };
    f.render_widget(error_line(&state.board.errors.title), rows[1]);
    f.render_widget(error_line(&state.board.errors.due_date), rows[4]);

    let status_border = if state.field == FormField::Status {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let status = Paragraph::new(format!("< {} >", form.status.label()))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Status (Space to change)")
                .border_style(status_border),
        );
    f.render_widget(status, rows[5]);
}

fn draw_confirm(f: &mut Frame, state: &AppState) {
    let area = centered(f.area(), 50, 5);
    f.render_widget(Clear, area);
    let name = state
        .board
        .delete_id
        .as_ref()
        .and_then(|id| state.board.task(id))
        .map(|t| t.title.as_str())
        .unwrap_or("this task");
    let confirm = Paragraph::new(format!("Delete \"{}\"? (y/n)", name))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(confirm, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
