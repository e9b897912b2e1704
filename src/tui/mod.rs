// File: ./src/tui/mod.rs
// Terminal front end: UI loop plus a network actor
pub mod action;
pub mod input;
pub mod state;
pub mod view;

use crate::client::{TaskApi, TaskHttpClient};
use crate::config::Config;
use action::{Action, AppEvent};
use state::AppState;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use directories::ProjectDirs;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "taskboard.log";

/// stdout belongs to the terminal, so logs go to a file in the data dir.
fn init_file_logging() -> Result<()> {
    let Some(proj) = ProjectDirs::from("com", "taskboard", "taskboard") else {
        return Ok(());
    };
    fs::create_dir_all(proj.data_dir())?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(proj.data_dir().join(LOG_FILE_NAME))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskboard=info"));
    // Ignore "already set" when embedded in a host that installed its own.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn spawn_actor(
    api: Arc<dyn TaskApi>,
    mut action_rx: mpsc::Receiver<Action>,
    event_tx: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        while let Some(action) = action_rx.recv().await {
            match action {
                Action::Quit => break,
                Action::Dispatch(request) => {
                    // Each request settles on its own; nothing is serialized.
                    let api = api.clone();
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let outcome = request.execute(api.as_ref()).await;
                        let _ = tx.send(AppEvent::Outcome(outcome)).await;
                    });
                }
            }
        }
    });
}

pub async fn run() -> Result<()> {
    init_file_logging()?;

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "config unreadable, using defaults");
            Config::default()
        }
    };
    tracing::info!(api_url = %config.api_url, "starting task board");
    let api: Arc<dyn TaskApi> = Arc::new(TaskHttpClient::new(
        &config.api_url,
        config.allow_insecure_certs,
    )?);

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(chrono::Local::now().date_naive());
    let (action_tx, action_rx) = mpsc::channel(32);
    let (event_tx, mut event_rx) = mpsc::channel(32);
    spawn_actor(api, action_rx, event_tx);

    let _ = action_tx
        .send(Action::Dispatch(app_state.board.load()))
        .await;

    let result: Result<()> = async {
        loop {
            app_state.set_today(chrono::Local::now().date_naive());
            terminal.draw(|f| view::draw(f, &mut app_state))?;

            while let Ok(event) = event_rx.try_recv() {
                let AppEvent::Outcome(outcome) = event;
                app_state.apply(outcome);
            }

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                match input::handle_key(&mut app_state, key) {
                    Some(Action::Quit) => {
                        let _ = action_tx.send(Action::Quit).await;
                        break;
                    }
                    Some(action) => {
                        if action_tx.send(action).await.is_err() {
                            app_state.board.error = Some("Network worker stopped".to_string());
                        }
                    }
                    None => {}
                }
            }
        }
        Ok(())
    }
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}
