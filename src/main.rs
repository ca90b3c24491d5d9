use std::fs::File;
use std::io;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod clock;
mod config;
mod forecast;
mod i18n;
mod owm;
mod units;
mod weather;

use crate::app::{fetch_report, run_app, Settings, Station};
use crate::cli::Args;
use crate::config::Config;

/// Log to a file; the terminal belongs to the UI.
fn init_logging(config: &Config) -> Result<()> {
    let file = File::create(&config.general.log_file)
        .with_context(|| format!("Failed to create log file: {}", config.general.log_file))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    config.apply_args(&args);
    config.validate()?;

    init_logging(&config)?;
    info!(
        "wxstation {} starting for location {} ({})",
        env!("CARGO_PKG_VERSION"),
        config.location.name,
        config.location.id
    );

    let settings = Settings::from_config(&config)?;
    let query = config.query()?;
    let zone = settings.zone;
    let mut station = Station::new(settings);

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let res = run_app(&mut terminal, &mut station, || fetch_report(&query, zone));

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    info!("wxstation stopped");
    Ok(())
}
