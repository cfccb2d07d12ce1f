use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use dirwatch::app::{self, App};
use dirwatch::config::{self, BackendKind};
use dirwatch::logging;
use dirwatch::ui::theme::{Theme, ThemeVariant};
use dirwatch::watcher::NotifySource;

/// Browse a directory and watch it update live
#[derive(Parser)]
#[command(name = "dirwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to open (default: config start_directory, then the working directory)
    path: Option<PathBuf>,

    /// Config file (default: <config dir>/dirwatch/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Poll for changes instead of using native notifications
    #[arg(long)]
    poll: bool,

    /// Poll interval in milliseconds (implies --poll)
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Log file (default: <data dir>/dirwatch/dirwatch.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Theme: zinc, nord, light, solarized-dark
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Config, with command line overrides
    let mut config = config::load(cli.config.as_deref())?;
    if cli.poll || cli.poll_interval_ms.is_some() {
        config.watch.backend = BackendKind::Poll;
    }
    if let Some(ms) = cli.poll_interval_ms {
        config.watch.poll_interval_ms = ms;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = Some(log_file);
    }
    if let Some(theme) = cli.theme {
        config.theme = Some(theme);
    }
    config.validate()?;

    // 2. Logging
    let _log_guard = logging::init(&config.log_file())?;
    info!("Starting dirwatch ({:?} backend)", config.backend());

    let variant = match config.theme.as_deref() {
        Some(name) => ThemeVariant::from_name(name).unwrap_or_else(|| {
            warn!("Unknown theme {:?}, using default", name);
            ThemeVariant::Zinc
        }),
        None => ThemeVariant::Zinc,
    };

    let start = match cli.path.or_else(|| config.start_directory.clone()) {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    // 3. Core. A bad start directory shows up as an error dialog.
    let mut app = App::new(NotifySource::new(config.backend()), Theme::new(variant));
    app.open_directory(&start);

    // 4. Setup TUI
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 5. Main Loop
    let loop_result = app::run(&mut terminal, &mut app);

    // 6. Cleanup
    app.shutdown();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("Stopped");

    loop_result
}
