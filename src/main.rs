mod api;
mod app;
mod cli;
mod config;
mod error;
mod event;
mod logging;
mod markdown;
mod model;
mod ui;
mod widget;

use std::io;
use std::panic;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use api::ChatApi;
use app::{Action, App};
use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Command::Ask { plain, message }) => {
            logging::init_stderr()?;
            let config = cli.resolve_config()?;
            return cli::handle_ask(&config, message, *plain).await;
        }
        Some(Command::Render { text }) => {
            logging::init_stderr()?;
            cli::handle_render(text);
            return Ok(());
        }
        None => {}
    }

    logging::init_file(&config::log_path())?;
    let config = cli.resolve_config()?;
    let api: Arc<dyn ChatApi> = Arc::from(api::create_api(&config.chat)?);
    tracing::info!(endpoint = api.endpoint(), "folio-chat starting");

    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(&config, api, action_tx.clone());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Spawn event reader
    let event_tx = action_tx.clone();
    tokio::spawn(async move {
        event::run_event_loop(event_tx).await;
    });

    // Main loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(action) = action_rx.recv().await {
            app.update(action);
            if app.should_quit {
                break;
            }
        } else {
            break;
        }
    }

    // Restore terminal
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
