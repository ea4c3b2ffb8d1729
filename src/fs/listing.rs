use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ListingError;
use crate::fs::format::{format_mode, format_size, mode_of};

/// Snapshot of one filesystem item inside a listed directory.
///
/// Type flags describe the entry itself: a symlink is reported as a symlink
/// (and not a directory) even when it points at one. Resolving the target is
/// left to [`SelectionPolicy`](crate::browser::policy::SelectionPolicy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Display name; lossy for names that are not valid UTF-8.
    pub name: String,
    /// Name exactly as stored on disk.
    pub file_name: OsString,
    pub is_dir: bool,
    pub is_symlink: bool,
    /// Full `st_mode`: type and permission bits.
    pub mode: u32,
    pub size: u64,
}

impl DirectoryEntry {
    /// Build an entry from `read_dir` output without following symlinks.
    pub fn from_dir_entry(entry: &fs::DirEntry) -> std::io::Result<Self> {
        let meta = fs::symlink_metadata(entry.path())?;
        let file_type = meta.file_type();
        let file_name = entry.file_name();
        Ok(Self {
            name: file_name.to_string_lossy().into_owned(),
            file_name,
            is_dir: file_type.is_dir(),
            is_symlink: file_type.is_symlink(),
            mode: mode_of(&meta),
            size: meta.len(),
        })
    }

    /// Path of this entry inside `directory`.
    pub fn path_in(&self, directory: &Path) -> PathBuf {
        directory.join(&self.file_name)
    }

    /// Leading-dot names are hidden.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// `ls`-style permission string.
    pub fn permissions(&self) -> String {
        format_mode(self.mode)
    }

    pub fn human_size(&self) -> String {
        format_size(self.size)
    }
}

/// Sorted, filtered entries of exactly one directory.
///
/// A listing is never edited: a directory change or refresh produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    entries: Vec<DirectoryEntry>,
}

impl Listing {
    /// An empty listing, used when a read fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Filter hidden entries (unless `show_hidden`) and sort:
    /// directories first, then files, each group by name.
    pub fn from_entries(entries: Vec<DirectoryEntry>, show_hidden: bool) -> Self {
        let mut entries: Vec<DirectoryEntry> = if show_hidden {
            entries
        } else {
            entries.into_iter().filter(|e| !e.is_hidden()).collect()
        };
        entries.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DirectoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DirectoryEntry> {
        self.entries.iter()
    }
}

/// Source of directory listings.
///
/// Implementations may block; callers run them off the input path.
pub trait EntryLister: Send + Sync {
    fn list(&self, directory: &Path, show_hidden: bool) -> Result<Listing, ListingError>;
}

/// Lists directories from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl EntryLister for FsLister {
    fn list(&self, directory: &Path, show_hidden: bool) -> Result<Listing, ListingError> {
        let dir = directory.to_path_buf();
        let meta = fs::metadata(directory).map_err(|e| ListingError::from_io(dir.clone(), &e))?;
        if !meta.is_dir() {
            return Err(ListingError::NotADirectory(dir));
        }

        let read = fs::read_dir(directory).map_err(|e| ListingError::from_io(dir.clone(), &e))?;
        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| ListingError::from_io(dir.clone(), &e))?;
            match DirectoryEntry::from_dir_entry(&entry) {
                Ok(e) => entries.push(e),
                // Removed between readdir and stat.
                Err(err) => tracing::debug!(
                    path = %entry.path().display(),
                    error = %err,
                    "skipping entry that could not be stat'ed"
                ),
            }
        }

        let listing = Listing::from_entries(entries, show_hidden);
        tracing::debug!(
            directory = %directory.display(),
            entries = listing.len(),
            show_hidden,
            "listed directory"
        );
        Ok(listing)
    }
}

#[cfg(test)]
impl DirectoryEntry {
    pub fn test_file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: OsString::from(name),
            is_dir: false,
            is_symlink: false,
            mode: 0o100_644,
            size: 0,
        }
    }

    pub fn test_dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: OsString::from(name),
            is_dir: true,
            is_symlink: false,
            mode: 0o040_755,
            size: 4096,
        }
    }

    pub fn test_symlink(name: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: OsString::from(name),
            is_dir: false,
            is_symlink: true,
            mode: 0o120_777,
            size: 0,
        }
    }
}
