use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Expand a leading `~` (alone or followed by `/`) to `home`.
///
/// `~user` forms are left untouched, as is everything when `home` is unknown.
pub fn expand_tilde(raw: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return raw.to_path_buf();
    };
    match raw.strip_prefix("~") {
        Ok(rest) if rest.as_os_str().is_empty() => home.to_path_buf(),
        Ok(rest) => home.join(rest),
        Err(_) => raw.to_path_buf(),
    }
}

/// Turn a user-supplied start path into an absolute, canonical directory.
pub fn resolve_start_path(raw: &Path, home: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(raw, home);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    let canonical = absolute
        .canonicalize()
        .map_err(|_| AppError::InvalidPath(format!("{} does not exist", absolute.display())))?;
    if !canonical.is_dir() {
        return Err(AppError::InvalidPath(format!(
            "{} is not a directory",
            canonical.display()
        )));
    }
    Ok(canonical)
}

/// Copy `src` into `dest_dir` under its own file name, overwriting.
///
/// Copying a file onto itself is a no-op. Returns the destination path.
pub fn copy_into(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = src
        .file_name()
        .ok_or_else(|| AppError::InvalidPath(format!("{} has no file name", src.display())))?;
    let dest = dest_dir.join(name);

    let copy_err = |source| AppError::Copy {
        from: src.to_path_buf(),
        to: dest.clone(),
        source,
    };

    if !dest_dir.is_dir() {
        return Err(copy_err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "destination is not a directory",
        )));
    }

    let src_real = src.canonicalize().map_err(copy_err)?;
    if dest.canonicalize().ok().as_deref() == Some(src_real.as_path()) {
        tracing::debug!(path = %dest.display(), "source and destination are the same file");
        return Ok(dest);
    }

    fs::copy(src, &dest).map_err(copy_err)?;
    tracing::info!(from = %src.display(), to = %dest.display(), "copied selection");
    Ok(dest)
}
