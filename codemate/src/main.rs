//! `Codemate`: a terminal chat widget that simulates a coding assistant.
//!
//! Opens the widget docked to the right of the terminal. Configuration via
//! CLI flags, environment variables, or config file
//! (`~/.config/codemate/config.toml`).
//!
//! ```bash
//! cargo run --bin codemate
//!
//! # Faster replies, no greeting
//! cargo run --bin codemate -- --reply-delay-min-ms 200 --reply-delay-max-ms 400 --no-welcome
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use codemate::app::App;
use codemate::attach::DiskFiles;
use codemate::clipboard::SystemClipboard;
use codemate::config::{CliArgs, ClientConfig};
use codemate::io::{self as worker, DEFAULT_CHANNEL_CAPACITY, IoCommand, IoEvent};
use codemate::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // CLI args > env > config file > defaults.
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config: {e}");
            ClientConfig::default()
        }
    };

    // Logs go to a file; ratatui owns stdout.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("codemate starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("codemate exiting");
    result
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown so buffered
/// log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("codemate.log");
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

/// Main widget loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(config);
    let (cmd_tx, mut evt_rx) =
        worker::spawn_io(DiskFiles, Box::new(SystemClipboard), DEFAULT_CHANNEL_CAPACITY);

    loop {
        // Step 1: Fit the input to the current width, then draw.
        let size = terminal.size()?;
        let screen = Rect::new(0, 0, size.width, size.height);
        app.set_input_width(ui::input_wrap_width(screen, app.ui()));
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain finished background I/O. Fallback copies are
        // written here, between frames.
        drain_io_events(&mut app, &mut evt_rx, terminal.backend_mut());

        // Step 3: Resolve due replies, expire the copy indicator.
        app.tick();

        // Step 4: Poll for terminal input.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(cmd) = app.handle_key_event(key) {
                dispatch_io(&cmd_tx, cmd);
            }
        }

        if app.should_quit {
            app.teardown();
            let _ = cmd_tx.try_send(IoCommand::Shutdown);
            return Ok(());
        }
    }
}

fn dispatch_io(tx: &mpsc::Sender<IoCommand>, cmd: IoCommand) {
    match tx.try_send(cmd) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(cmd)) => {
            tracing::warn!(?cmd, "io worker busy, command dropped");
        }
        Err(mpsc::error::TrySendError::Closed(cmd)) => {
            tracing::error!(?cmd, "io worker stopped, command dropped");
        }
    }
}

/// Apply all pending `IoEvent`s to the widget.
fn drain_io_events<W: io::Write>(app: &mut App, rx: &mut mpsc::Receiver<IoEvent>, out: &mut W) {
    while let Ok(event) = rx.try_recv() {
        app.apply_io_event(worker::complete_on_terminal(event, out));
    }
}
