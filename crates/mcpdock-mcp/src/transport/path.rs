//! PATH construction and executable resolution for subprocess servers.
//!
//! Servers are usually launched through `npx`, `uvx`, `bunx` and friends,
//! which live in per-user install directories that GUI launchers and
//! service managers leave off `PATH`.

use std::collections::HashSet;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// System-wide directories package managers install into.
#[cfg(unix)]
const SYSTEM_DIRS: &[&str] = &[
    "/opt/homebrew/bin",
    "/usr/local/bin",
    "/usr/bin",
    "/bin",
    "/usr/sbin",
    "/sbin",
];

#[cfg(not(unix))]
const SYSTEM_DIRS: &[&str] = &[];

/// Per-user install directories, relative to the home directory.
const HOME_DIRS: &[&str] = &[
    ".local/bin",
    ".cargo/bin",
    ".bun/bin",
    ".deno/bin",
    ".volta/bin",
    ".npm-global/bin",
];

/// Common install directories that exist on this machine.
pub fn common_install_dirs() -> Vec<PathBuf> {
    let home = dirs::home_dir();
    SYSTEM_DIRS
        .iter()
        .map(PathBuf::from)
        .chain(
            home.iter()
                .flat_map(|home| HOME_DIRS.iter().map(move |rel| home.join(rel))),
        )
        .filter(|dir| dir.is_dir())
        .collect()
}

/// Build the PATH handed to a child process.
///
/// Order:
/// 1. Directory containing the executable (so scripts find their interpreter)
/// 2. Current process PATH
/// 3. Common install directories
///
/// Entries are deduplicated, keeping the first occurrence.
pub fn build_effective_path(exe_dir: Option<&Path>) -> OsString {
    let current: Vec<PathBuf> = env::var_os("PATH")
        .map(|path| env::split_paths(&path).collect())
        .unwrap_or_default();

    let mut seen = HashSet::new();
    let entries: Vec<PathBuf> = exe_dir
        .map(Path::to_path_buf)
        .into_iter()
        .chain(current)
        .chain(common_install_dirs())
        .filter(|entry| !entry.as_os_str().is_empty() && seen.insert(entry.clone()))
        .collect();

    env::join_paths(&entries)
        .unwrap_or_else(|_| env::var_os("PATH").unwrap_or_default())
}

/// Resolve `program` against `search_path`.
///
/// Absolute and relative paths are checked directly; bare names are looked
/// up in every `search_path` entry.
pub fn resolve_executable(program: &str, search_path: &OsStr) -> Result<PathBuf, String> {
    let cwd = env::current_dir().map_err(|e| format!("cannot determine current directory: {e}"))?;
    which::which_in(program, Some(search_path), cwd)
        .map_err(|e| format!("executable '{program}' not found: {e}"))
}
