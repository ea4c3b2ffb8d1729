mod app;
mod browser;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod theme;
mod tui;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::app::{App, Outcome};
use crate::browser::SessionOptions;
use crate::config::{AppConfig, GeneralConfig, PickerConfig};
use crate::event::{Event, EventHandler};
use crate::fs::listing::FsLister;
use crate::fs::operations::{copy_into, resolve_start_path};
use crate::logging::Verbosity;
use crate::tui::{install_panic_hook, Tui};

/// Browse the filesystem in the terminal and pick a single file.
#[derive(Parser, Debug)]
#[command(name = "dirpick", version, about)]
struct Cli {
    /// Directory to start in (defaults to the configured default_path, then ".")
    path: Option<PathBuf>,

    /// Show hidden files
    #[arg(long)]
    hidden: bool,

    /// Only allow files ending with this suffix (repeatable)
    #[arg(long = "ext", value_name = "SUFFIX")]
    extensions: Vec<String>,

    /// Allow selecting directories
    #[arg(long)]
    dirs: bool,

    /// Disallow selecting files
    #[arg(long)]
    no_files: bool,

    /// Number of list rows (defaults to the terminal height)
    #[arg(long, value_name = "ROWS")]
    height: Option<usize>,

    /// Directory to copy the picked file into (defaults to the working directory)
    #[arg(long, value_name = "DIR")]
    dest: Option<PathBuf>,

    /// Print the picked path instead of copying it
    #[arg(long)]
    print_only: bool,

    /// Path to config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build a partial config from CLI flags. Flags that were not given stay
/// `None` so they don't clobber file values.
fn cli_overrides(cli: &Cli) -> AppConfig {
    AppConfig {
        general: GeneralConfig {
            show_hidden: cli.hidden.then_some(true),
            ..Default::default()
        },
        picker: PickerConfig {
            allowed_extensions: (!cli.extensions.is_empty()).then(|| cli.extensions.clone()),
            allow_files: cli.no_files.then_some(false),
            allow_dirs: cli.dirs.then_some(true),
            height: cli.height,
            cursor: None,
        },
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    if let Some(log_path) = logging::log_path(cli.log_file.as_deref()) {
        logging::init_subscriber(&log_path, Verbosity::from_flag(cli.verbose))?;
    }

    let config = AppConfig::load(cli.config.as_deref(), Some(&cli_overrides(&cli)));

    let home = dirs::home_dir();
    let cwd = std::env::current_dir()?;
    let raw_path = cli
        .path
        .clone()
        .or_else(|| config.default_path().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let start = resolve_start_path(&raw_path, home.as_deref(), &cwd)?;
    let dest = match &cli.dest {
        Some(dest) => resolve_start_path(dest, home.as_deref(), &cwd)?,
        None => cwd,
    };
    tracing::info!(start = %start.display(), dest = %dest.display(), "starting picker");

    install_panic_hook();
    let mut tui = Tui::new()?;
    let result = run(&mut tui, &config, start).await;
    tui.restore()?;

    match result? {
        Outcome::Selected(path) => deliver(&path, &dest, cli.print_only),
        Outcome::Cancelled => {
            tracing::info!("nothing selected");
            Ok(())
        }
    }
}

/// Drive the picker until a selection or cancellation.
async fn run(tui: &mut Tui, config: &AppConfig, start: PathBuf) -> error::Result<Outcome> {
    let auto_height = config.fixed_height().is_none();
    let height = match config.fixed_height() {
        Some(height) => height,
        None => tui.height()?.saturating_sub(ui::CHROME_ROWS).max(1) as usize,
    };

    let mut events = EventHandler::new(Duration::from_millis(100));
    let options = SessionOptions {
        initial_directory: start,
        height,
        show_hidden: config.show_hidden(),
        policy: config.selection_policy(),
    };
    let mut app = App::new(
        options,
        Arc::new(FsLister),
        events.sender(),
        theme::resolve_theme(&config.theme),
        config.cursor().to_string(),
        auto_height,
    );
    app.start();

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => app.clear_expired_status(),
            Event::Resize(rows) => app.handle_resize(rows),
            Event::Listing(message) => app.handle_listing(message),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(app.outcome().unwrap_or(Outcome::Cancelled))
}

/// Copy a picked file into `dest`, or print the path for directories and
/// `--print-only`.
fn deliver(path: &Path, dest: &Path, print_only: bool) -> error::Result<()> {
    if !print_only && path.is_file() {
        let copied = copy_into(path, dest)?;
        println!("Copied: {} -> {}", path.display(), copied.display());
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
