//! Tracing subscriber initialization.
//!
//! The terminal belongs to the picker while it runs, so logs are written to a
//! file. Without `--log-file` or `$DIRPICK_LOG_FILE` nothing is installed and
//! every `tracing` macro is a no-op.
//!
//! # Filter priority (highest to lowest)
//!
//! 1. `DIRPICK_LOG` env var (per-target directives, e.g. `dirpick=debug`)
//! 2. `RUST_LOG` env var
//! 3. `-v` / `--verbose` → debug
//! 4. Default level: `info`

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Verbosity level derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Normal,
    Verbose,
}

impl Verbosity {
    pub const fn from_flag(verbose: bool) -> Self {
        if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    pub const fn default_level(self) -> Level {
        match self {
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Pick the log destination: the CLI flag wins over `$DIRPICK_LOG_FILE`.
pub fn log_path(cli: Option<&Path>) -> Option<PathBuf> {
    cli.map(Path::to_path_buf).or_else(|| {
        std::env::var_os("DIRPICK_LOG_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Install the global subscriber writing to `path` (appending).
///
/// Call once, before config loading, so config warnings are captured.
pub fn init_subscriber(path: &Path, verbosity: Verbosity) -> Result<()> {
    let file = open_log_file(path)?;
    let filter = build_env_filter(verbosity);

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::debug!(path = %path.display(), ?verbosity, "logging initialized");
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// `DIRPICK_LOG` > `RUST_LOG` > CLI verbosity default.
fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    // An unparseable DIRPICK_LOG falls through instead of failing.
    if let Ok(directives) = std::env::var("DIRPICK_LOG") {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = verbosity.default_level();
    EnvFilter::try_new(level.as_str()).unwrap_or_else(|_| EnvFilter::new("info"))
}
