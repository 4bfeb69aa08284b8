//! `TaskDeck` — terminal task-list manager backed by a remote store.
//!
//! Launches the TUI and connects to a task store server when one is
//! configured; without one it runs against an in-memory demo store.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Offline demo mode
//! cargo run --bin taskdeck
//!
//! # Connect to a server
//! cargo run --bin taskdeck -- --server-url http://127.0.0.1:9400
//!
//! # Or via environment variables
//! TASKDECK_SERVER_URL=http://127.0.0.1:9400 TASKDECK_TOKEN=s3cret cargo run
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::app::App;
use taskdeck::bridge::{self, BridgeConfig, StoreCommand, StoreEvent};
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::store::{HttpStore, MemoryStore};
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("taskdeck starting");

    // Spawn the store task before ratatui owns the terminal.
    let bridge_config = BridgeConfig {
        channel_capacity: config.channel_capacity,
        notice_timeout: config.notice_timeout,
    };
    let (cmd_tx, evt_rx) = match &config.server_url {
        Some(url) => {
            tracing::info!(url = %url, "using remote task store");
            bridge::spawn_store(
                HttpStore::new(url.as_str(), config.auth_token.clone()),
                &bridge_config,
            )
        }
        None => {
            tracing::info!("no server configured, using in-memory demo store");
            bridge::spawn_store(MemoryStore::with_demo_tasks(), &bridge_config)
        }
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, cmd_tx, evt_rx, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cmd_tx: mpsc::Sender<StoreCommand>,
    mut evt_rx: mpsc::Receiver<StoreEvent>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new();
    app.timestamp_format = config.timestamp_format.clone();

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending store events (non-blocking).
        while let Ok(event) = evt_rx.try_recv() {
            app.apply_event(event);
        }

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(StoreCommand) when the user
            // action requires a store dispatch (create, toggle, delete,
            // sort, reload).
            if let Some(cmd) = app.handle_key_event(key)
                && cmd_tx.try_send(cmd).is_err()
            {
                tracing::warn!("store task unavailable, command dropped");
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(StoreCommand::Shutdown);
            return Ok(());
        }
    }
}
