use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::store::{StoreEvent, TechniqueStore};
use crate::ui::app_component::AppComponent;
use crate::ui::core::{EventHandler, EventType};

/// Async event loop: terminal setup, then alternate between rendering and
/// event handling until the app asks to quit.
pub async fn run_app(
    config: &Config,
    store: TechniqueStore,
    store_events: mpsc::UnboundedReceiver<StoreEvent>,
    media_token: Option<String>,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppComponent::new(config, store, store_events, media_token);
    let mut event_handler = EventHandler::new();

    app.init();

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| app.render(f, f.area()))?;

        let event = event_handler.next_event().await?;
        app.handle_event(event)?;

        if app.should_quit() {
            return Ok(());
        }
    }
}
