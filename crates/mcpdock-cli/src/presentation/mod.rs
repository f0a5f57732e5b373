//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no manager calls, no domain transforms.

pub mod server_display;
pub mod tables;

pub use server_display::{format_status, format_timestamp};
pub use tables::{format_optional, print_separator, truncate_string};
