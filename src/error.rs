use std::path::PathBuf;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from terminal or filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid start path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Copying the confirmed selection failed.
    #[error("Copy failed: {} -> {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to read a directory listing.
///
/// Never fatal: the browser shows an empty listing and keeps accepting input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("no such directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl ListingError {
    /// Classify an `io::Error` raised while reading `path`.
    pub fn from_io(path: PathBuf, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => ListingError::PermissionDenied(path),
            std::io::ErrorKind::NotFound => ListingError::NotFound(path),
            _ => ListingError::Io {
                path,
                message: err.to_string(),
            },
        }
    }
}
