mod app;
mod config;
mod diary_entry;
mod diary_state;
mod logging;
mod login;
mod preferences;
mod timestamp;
mod ui;

use app::App;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use config::{Args, Config, PREFERENCES_NAME};
use crossterm::event::{self, Event, KeyEventKind};
use preferences::FilePreferences;
use ratatui::backend::Backend;
use std::time::{Duration, Instant};
use tracing::info;
use ui::{TerminalGuard, UI};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::from_args(Args::parse())?;
    logging::init(&config.log_path(), config.log_level.as_deref())
        .wrap_err("failed to set up logging")?;

    let store = FilePreferences::open(&config.data_dir, PREFERENCES_NAME);
    info!(path = %store.path().display(), "starting secret diary");
    let mut app = App::new(Box::new(store));

    let guard = TerminalGuard::enter()?;
    let mut ui = UI::new()?;
    let result = run(&mut ui, &mut app);
    drop(guard);

    info!("exiting");
    result
}

fn run<B: Backend>(ui: &mut UI<B>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        ui.display(app)?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        app.tick(Instant::now());
    }
    Ok(())
}
