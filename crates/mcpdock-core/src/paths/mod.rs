//! Path utilities for mcpdock data directories.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O
//! - OS-specific logic is kept private in `platform`

mod error;
mod platform;

#[cfg(test)]
mod test_utils;

pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, store_dir};
