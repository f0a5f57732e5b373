//! Status and timestamp formatting.

use chrono::{DateTime, Local, Utc};
use mcpdock_core::domain::{ConnectionState, ServerStatus};

/// One-word status, with the error message when there is one.
pub fn format_status(status: Option<&ServerStatus>) -> String {
    let Some(status) = status else {
        return ConnectionState::Disconnected.to_string();
    };
    match (&status.state, &status.last_error) {
        (ConnectionState::Error, Some(error)) => format!("error: {error}"),
        (state, _) => state.to_string(),
    }
}

/// Local-time rendering of a UTC timestamp.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
