use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;
use tripane::app::Workbench;
use tripane::cli::{CliArgs, USAGE};
use tripane::core::event::InputEvent;
use tripane::core::view::View;
use tripane::kernel::services::adapters::{
    apply_service_overrides, ensure_settings_file, load_settings_from, AppMessage, AsyncRuntime,
    HttpDocumentRemote, SERVICE_URL_ENV,
};
use tripane::kernel::services::ports::Settings;
use tripane::tui::{TerminalGuard, TerminationSignal};

mod logging;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const MAX_MESSAGES_PER_TICK: usize = 256;

fn main() -> io::Result<()> {
    let cli = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let mut logging = logging::init();
    let log_rx = logging.as_mut().and_then(|g| g.take_log_rx());

    let settings = load_startup_settings(&cli);
    tracing::info!(
        base_url = %settings.service.base_url,
        timeout_secs = settings.service.timeout_secs,
        "starting"
    );

    let remote = Arc::new(HttpDocumentRemote::new(&settings.service));
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx, remote)?;
    let mut workbench = Workbench::new(runtime, &settings, log_rx);

    let guard = TerminalGuard::new()?;
    let (sig_tx, sig_rx) = mpsc::channel();
    #[cfg(unix)]
    let _signals = tripane::tui::terminal_guard::install_termination_signals(guard.restorer(), sig_tx)?;
    #[cfg(not(unix))]
    drop(sig_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let result = run(&mut terminal, &mut workbench, &rx, &sig_rx);

    workbench.shutdown();
    drop(terminal);
    drop(guard);
    if let Err(e) = &result {
        tracing::error!(error = %e, "main loop failed");
    }
    result
}

fn load_startup_settings(cli: &CliArgs) -> Settings {
    let mut settings = match ensure_settings_file() {
        Ok(path) => load_settings_from(&path).unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "settings file unavailable, using defaults");
            Settings::default()
        }
    };
    apply_service_overrides(
        &mut settings,
        std::env::var(SERVICE_URL_ENV).ok(),
        cli.service_url.clone(),
    );
    settings
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    workbench: &mut Workbench,
    rx: &Receiver<AppMessage>,
    signals: &Receiver<TerminationSignal>,
) -> io::Result<()> {
    let mut dirty = true;
    loop {
        if let Ok(signal) = signals.try_recv() {
            tracing::info!(?signal, "shutting down");
            return Ok(());
        }

        for msg in rx.try_iter().take(MAX_MESSAGES_PER_TICK) {
            dirty |= workbench.handle_message(msg);
        }
        dirty |= workbench.tick();

        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                workbench.render(frame, area);
                if let Some((x, y)) = workbench.cursor_position() {
                    frame.set_cursor_position((x, y));
                }
            })?;
            dirty = false;
        }

        if !crossterm::event::poll(POLL_INTERVAL)? {
            continue;
        }
        let event: InputEvent = crossterm::event::read()?.into();
        let result = workbench.handle_input(&event);
        if result.is_quit() {
            return Ok(());
        }
        dirty = true;
    }
}
