//! src/main.rs
//! Terminal record viewer: search, sort and page through a user dataset.

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Mutex, Notify},
};
use tracing::{error, info, warn};

use roster_core::{
    Logger,
    cli::Args,
    config::Config,
    controller::{actions::Action, event_loop::EventLoop},
    logging::LoggerConfig,
    model::{app_state::AppState, dataset::Dataset},
    view::ui::UIRenderer,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    args.apply_to(&mut config);
    config.view.validate()?;

    let _log_guard = Logger::init_tracing(&LoggerConfig::from(&config.logging))
        .await
        .context("Failed to initialize logging")?;
    info!("Starting roster");

    let dataset = match &config.data_path {
        Some(path) => Dataset::load(path).await?,
        None => Dataset::sample()?,
    };
    info!(records = dataset.len(), "Dataset loaded");

    let app_state = AppState::from_config(dataset, &config)?;

    setup_panic_handler();
    let app = App::new(app_state, &config).context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    app: Arc<Mutex<AppState>>,
    ui_renderer: UIRenderer,
    shutdown: Arc<Notify>,
}

impl App {
    fn new(state: AppState, config: &Config) -> Result<Self> {
        let terminal = setup_terminal().context("Failed to initialize terminal")?;
        let app = Arc::new(Mutex::new(state));

        Ok(Self {
            terminal,
            event_loop: EventLoop::new(app.clone()),
            app,
            ui_renderer: UIRenderer::new(config.theme),
            shutdown: Arc::new(Notify::new()),
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();

        let result = self.event_loop_body().await;

        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Terminal cleanup failed: {e:#}");
        }
        let stats = &self.ui_renderer.stats;
        info!(
            frames = stats.frames,
            slow = stats.slow,
            avg_us = stats.total.as_micros().checked_div(u128::from(stats.frames)).unwrap_or(0),
            "Render stats"
        );
        result
    }

    async fn event_loop_body(&mut self) -> Result<()> {
        info!("Starting event loop");
        loop {
            self.render().await?;

            tokio::select! {
                () = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                action = self.event_loop.next_action() => {
                    match action {
                        Some(Action::Quit) => {
                            info!("Quit action from terminal event");
                            break;
                        }
                        Some(action) => self.event_loop.dispatch_action(action).await,
                        None => break,
                    }
                }
            }
        }
        Ok(())
    }

    /// Draw a frame only when something asked for one.
    async fn render(&mut self) -> Result<()> {
        let app = self.app.lock().await;
        if !app.ui.needs_redraw() {
            return Ok(());
        }

        let start = Instant::now();
        let renderer = &mut self.ui_renderer;
        self.terminal
            .draw(|frame| renderer.render(frame, &app))
            .context("Failed to draw frame")?;
        app.ui.clear_redraw();

        if start.elapsed() > Duration::from_millis(16) {
            warn!("Slow frame: {:?}", start.elapsed());
        }
        Ok(())
    }

    fn setup_shutdown_handler(&self) {
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                return;
            }
            info!("Received Ctrl+C");
            shutdown.notify_one();
        });
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
