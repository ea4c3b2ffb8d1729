use std::fs;
use std::path::{Path, PathBuf};

use crate::fs::listing::DirectoryEntry;

/// Selection-relevant type of an entry after symlink resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveType {
    File,
    Directory,
}

/// Result of classifying one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub effective: EffectiveType,
    /// Canonical target of a symlink, when it could be resolved.
    pub resolved: Option<PathBuf>,
}

/// Decides what may be chosen in a browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Name suffixes a file must end with. Empty means any file.
    allowed_extensions: Vec<String>,
    allow_files: bool,
    allow_dirs: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: Vec::new(),
            allow_files: true,
            allow_dirs: false,
        }
    }
}

impl SelectionPolicy {
    pub fn new(allowed_extensions: Vec<String>, allow_files: bool, allow_dirs: bool) -> Self {
        Self {
            allowed_extensions,
            allow_files,
            allow_dirs,
        }
    }

    /// Resolve `entry` (a child of `directory`) to its effective type.
    ///
    /// A symlink counts as a directory only when its target exists and is a
    /// directory; an unresolvable link is treated as a file.
    pub fn classify(&self, entry: &DirectoryEntry, directory: &Path) -> Classification {
        if !entry.is_symlink {
            let effective = if entry.is_dir {
                EffectiveType::Directory
            } else {
                EffectiveType::File
            };
            return Classification {
                effective,
                resolved: None,
            };
        }

        let link = entry.path_in(directory);
        let target = match fs::canonicalize(&link) {
            Ok(target) => target,
            Err(err) => {
                tracing::debug!(link = %link.display(), error = %err, "unresolvable symlink");
                return Classification {
                    effective: EffectiveType::File,
                    resolved: None,
                };
            }
        };
        let effective = match fs::metadata(&target) {
            Ok(meta) if meta.is_dir() => EffectiveType::Directory,
            _ => EffectiveType::File,
        };
        Classification {
            effective,
            resolved: Some(target),
        }
    }

    /// Whether `name` passes the extension filter.
    pub fn can_select(&self, name: &str) -> bool {
        self.allowed_extensions.is_empty()
            || self
                .allowed_extensions
                .iter()
                .any(|ext| name.ends_with(ext.as_str()))
    }

    pub fn is_chooseable(&self, effective: EffectiveType) -> bool {
        match effective {
            EffectiveType::File => self.allow_files,
            EffectiveType::Directory => self.allow_dirs,
        }
    }

    /// Whether a confirm on `entry` would produce a selection.
    ///
    /// Directories only answer to the directory flag; files must also pass
    /// the extension filter.
    pub fn permits(&self, entry: &DirectoryEntry, classification: &Classification) -> bool {
        match classification.effective {
            EffectiveType::Directory => self.allow_dirs,
            EffectiveType::File => self.allow_files && self.can_select(&entry.name),
        }
    }
}
