// Composition root: wires adapters, the clock service and the TUI together

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};
use tzclock_core::domain::Event;
use tzclock_core::ports::{AppConfig, ConfigStore, SystemClock};

use crate::adapters::{http_api::HttpTimeApi, persistence::FileConfigStore, sound::TerminalBell};
use crate::cli::CliArgs;
use crate::config::from_cli_and_store;
use crate::services::clock_service::ClockService;
use crate::tui::{TuiMessage, TuiModel, TuiUpdate, TuiView};

/// The application: clock service, TUI model and terminal
pub struct TzClockApp {
    service: ClockService,
    tui_model: TuiModel,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    event_rx: mpsc::UnboundedReceiver<Event>,
}

impl TzClockApp {
    /// Build adapters and the service, then take over the terminal
    pub fn new(config: AppConfig, config_store: Arc<dyn ConfigStore>) -> Result<Self> {
        info!("Initializing tzclock");

        let api = Arc::new(HttpTimeApi::new(
            &config.server_url,
            Duration::from_secs(config.sync.request_timeout_secs),
        )?);
        let (service, event_rx) = ClockService::new(
            api,
            Arc::new(SystemClock),
            config_store,
            Arc::new(TerminalBell),
            config,
        );

        let terminal = setup_terminal()?;

        Ok(Self {
            service,
            tui_model: TuiModel::new(),
            terminal,
            event_rx,
        })
    }

    /// Run the application until the user quits
    pub async fn run(self) -> Result<()> {
        let TzClockApp {
            mut service,
            mut tui_model,
            mut terminal,
            event_rx,
        } = self;

        tui_model.sync_settings(service.engine().state());
        let first_frame = service.start();
        tui_model.apply_frame(first_frame);

        let result = run_main_loop(&mut service, &mut tui_model, &mut terminal, event_rx).await;

        service.shutdown();
        shutdown(&mut terminal)?;

        result
    }
}

/// Raw mode and the alternate screen. Raw mode is undone if the rest fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen)
        .and_then(|_| Terminal::new(CrosstermBackend::new(stdout)))
        .context("Failed to set up terminal");

    restore_on_error(terminal, || {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

/// Main loop - applies service events, handles keys, redraws
async fn run_main_loop(
    service: &mut ClockService,
    tui_model: &mut TuiModel,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut needs_redraw = true;

    loop {
        // Ticks, fetch results and zone lists from background tasks
        while let Ok(event) = event_rx.try_recv() {
            tui_model.apply_update(service.handle_event(event));
            needs_redraw = true;
        }

        // Handle user input
        if event::poll(Duration::from_millis(10))? {
            match event::read()? {
                TermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    let message = TuiUpdate::handle_key(tui_model, key_event.code, key_event.modifiers)?;
                    if let TuiMessage::Command(cmd) = message {
                        info!("Command: {:?}", cmd);
                        let update = service.handle_command(cmd);
                        tui_model.sync_settings(service.engine().state());
                        tui_model.apply_update(update);
                    }
                    needs_redraw = true;
                }
                TermEvent::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }

        if tui_model.should_quit {
            info!("Quit requested, exiting main loop");
            break;
        }

        if needs_redraw {
            terminal.draw(|frame| TuiView::render(tui_model, frame))?;
            needs_redraw = false;
        }

        // Small sleep to prevent busy waiting
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    Ok(())
}

/// Restore the terminal
fn shutdown(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    info!("Shutting down tzclock");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn default_log_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "tzclock")
        .context("Failed to determine project directories")?;
    Ok(proj_dirs.data_local_dir().join("tzclock.log"))
}

/// The TUI owns stdout, so logs go to a file
pub fn init_logging(log_file: Option<PathBuf>) -> Result<PathBuf> {
    let path = match log_file {
        Some(path) => path,
        None => default_log_path()?,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create log directory")?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

/// Entry point used by the binary
pub async fn run(cli_args: CliArgs) -> Result<()> {
    let log_path = init_logging(cli_args.log_file.clone())?;
    info!("Starting tzclock, logging to {}", log_path.display());

    let config_store: Arc<dyn ConfigStore> = match &cli_args.config {
        Some(path) => Arc::new(FileConfigStore::with_path(path)),
        None => Arc::new(FileConfigStore::new()?),
    };
    let config = from_cli_and_store(&cli_args, config_store.as_ref())?;
    info!("Loaded config: server {}, zone {:?}", config.server_url, config.default_zone);

    let app = TzClockApp::new(config, config_store)?;

    if let Err(e) = app.run().await {
        error!("Application error: {:#}", e);
        return Err(e);
    }

    info!("tzclock shut down cleanly");
    Ok(())
}
