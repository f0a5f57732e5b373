//! Input helpers shared by command handlers.

pub mod args;
pub mod input;
