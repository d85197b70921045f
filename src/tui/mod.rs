// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod network;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::context::AppContext;
use crate::loader::Loader;
use crate::model::Category;
use crate::snapshot::SnapshotSources;
use crate::system::SystemPlatform;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub async fn run(ctx: Arc<dyn AppContext>, cfg: Config) -> Result<()> {
    // Panic Hook: restore the terminal before the default hook prints.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        log::error!("PANIC: {}", info);
        default_hook(info);
    }));

    let loader = Loader::new(&cfg.source, &cfg.user_agent)?;
    let sources = SnapshotSources::from_config(&cfg);
    log::info!("Viewing {:?}", loader.source());

    // --- TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- STATE INIT ---
    let categories = sources.categories.iter().map(|(tag, _)| tag.clone()).collect::<Vec<Category>>();
    let mut app_state = AppState::new(categories);
    let mut platform = SystemPlatform::new(ctx);

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // --- NETWORK ACTOR ---
    tokio::spawn(network::run_network_actor(
        loader, sources, action_rx, event_tx,
    ));

    // --- UI LOOP ---
    let result = async {
        loop {
            terminal.draw(|f| draw(f, &mut app_state))?;

            while let Ok(event) = event_rx.try_recv() {
                handlers::handle_app_event(&mut app_state, event);
            }

            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            match event::read()? {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }
                    match handlers::handle_key_event(key, &mut app_state, &mut platform) {
                        Some(Action::Quit) => {
                            let _ = action_tx.send(Action::Quit).await;
                            break;
                        }
                        Some(action) => {
                            let _ = action_tx.send(action).await;
                        }
                        None => {}
                    }
                }
                _ => {}
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    // --- CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}
