mod grid;
mod ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::File, io, sync::Arc, sync::Mutex};
use taskgrid::{
    config::Config,
    loader::{FileTaskSource, StaticTaskSource, TaskSource},
    Store,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::grid::TaskGrid;

fn init_tracing(config: &Config) -> io::Result<()> {
    // stdout belongs to the terminal UI, so logs go to a file.
    let log_file = File::create(&config.log_file)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "taskgrid=info".to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config)?;
    info!(?config, "starting taskgrid");

    let source: Arc<dyn TaskSource> = match &config.seed_file {
        Some(path) => Arc::new(FileTaskSource::new(path)),
        None => Arc::new(StaticTaskSource::with_delay(config.load_delay)),
    };
    let mut store = Store::new(config.id_strategy.generator());
    let mut grid = TaskGrid::new(config.page_size);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut store, &mut grid, source).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    store.shutdown();

    if let Err(err) = result {
        error!("terminal error: {}", err);
        eprintln!("{:?}", err);
    }
    Ok(())
}
