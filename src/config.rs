//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--hidden`, `--ext`, `--dirs`, `--height`, ...)
//! 2. `--config <FILE>`
//! 3. `$DIRPICK_CONFIG` environment variable (path to config file)
//! 4. Project-local `.dirpick.toml` in the current working directory
//! 5. Global `~/.config/dirpick/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::browser::SelectionPolicy;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Starting directory when no path argument is given.
    pub default_path: Option<String>,
    /// Show hidden files by default.
    pub show_hidden: Option<bool>,
}

/// What may be picked and how the list is shown.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PickerConfig {
    /// Name suffixes a file must end with to be selectable.
    pub allowed_extensions: Option<Vec<String>>,
    pub allow_files: Option<bool>,
    pub allow_dirs: Option<bool>,
    /// Fixed number of list rows; unset follows the terminal height.
    pub height: Option<usize>,
    /// Marker drawn in front of the highlighted row.
    pub cursor: Option<String>,
}

/// Color overrides for the `custom` scheme.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub dir_fg: Option<String>,
    pub file_fg: Option<String>,
    pub symlink_fg: Option<String>,
    pub disabled_fg: Option<String>,
    pub cursor_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub picker: PickerConfig,
    pub theme: ThemeConfig,
}

/// Default cursor marker.
pub const DEFAULT_CURSOR: &str = ">>";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("DIRPICK_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".dirpick.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("dirpick").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(cfg)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`: `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                default_path: other
                    .general
                    .default_path
                    .clone()
                    .or(self.general.default_path),
                show_hidden: other.general.show_hidden.or(self.general.show_hidden),
            },
            picker: PickerConfig {
                allowed_extensions: other
                    .picker
                    .allowed_extensions
                    .clone()
                    .or(self.picker.allowed_extensions),
                allow_files: other.picker.allow_files.or(self.picker.allow_files),
                allow_dirs: other.picker.allow_dirs.or(self.picker.allow_dirs),
                height: other.picker.height.or(self.picker.height),
                cursor: other.picker.cursor.clone().or(self.picker.cursor),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that the highest-priority candidate wins.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn show_hidden(&self) -> bool {
        self.general.show_hidden.unwrap_or(false)
    }

    pub fn default_path(&self) -> Option<&str> {
        self.general.default_path.as_deref()
    }

    pub fn allowed_extensions(&self) -> &[String] {
        self.picker.allowed_extensions.as_deref().unwrap_or(&[])
    }

    pub fn allow_files(&self) -> bool {
        self.picker.allow_files.unwrap_or(true)
    }

    pub fn allow_dirs(&self) -> bool {
        self.picker.allow_dirs.unwrap_or(false)
    }

    /// Fixed list height, or `None` for auto height.
    pub fn fixed_height(&self) -> Option<usize> {
        self.picker.height.filter(|h| *h > 0)
    }

    pub fn cursor(&self) -> &str {
        self.picker.cursor.as_deref().unwrap_or(DEFAULT_CURSOR)
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::new(
            self.allowed_extensions().to_vec(),
            self.allow_files(),
            self.allow_dirs(),
        )
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
