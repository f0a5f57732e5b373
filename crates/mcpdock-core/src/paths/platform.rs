//! Platform-specific path resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MCPDOCK_DATA_DIR";

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `MCPDOCK_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/mcpdock`)
///
/// The directory is created if missing.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if path.trim().is_empty() => return Err(PathError::EmptyPath),
        Ok(path) => PathBuf::from(path.trim()),
        Err(_) => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("mcpdock"),
    };

    ensure_dir(&root)?;
    Ok(root)
}

/// Directory holding the key-value store documents.
pub fn store_dir() -> Result<PathBuf, PathError> {
    let dir = data_root()?.join("store");
    ensure_dir(&dir)?;
    Ok(dir)
}

fn ensure_dir(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
