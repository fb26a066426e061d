//! Filesystem helpers for transient dump handling

use crate::errors::AppResult;
use std::path::{Path, PathBuf};

/// Resolve a path relative to the directory containing the running binary
///
/// Absolute paths are returned unchanged. Relative paths are joined onto the
/// binary's parent directory; if the executable location cannot be determined
/// the path is left relative to the working directory.
pub fn resolve_beside_binary(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Delete the given files, reporting the first failure
///
/// Files that are already absent are not an error; the caller decides whether
/// a deletion failure is fatal or only worth a warning.
pub fn remove_files(paths: &[&Path]) -> AppResult<()> {
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
