//! Subprocess transport speaking newline-delimited JSON over stdin/stdout.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;

use mcpdock_core::domain::TransportKind;
use mcpdock_core::ports::Logger;

use super::Transport;
use super::path::{build_effective_path, resolve_executable};
use crate::error::TransportError;

/// How long a child gets to exit on its own after stdin closes.
const EXIT_GRACE: Duration = Duration::from_millis(500);

/// Transport over a child process' standard streams.
///
/// Standard error is discarded so diagnostics never interleave with
/// protocol frames.
pub struct StdioTransport {
    command: String,
    child: Mutex<Option<Child>>,
    stdin: Mutex<Option<ChildStdin>>,
    stdout: Mutex<Option<Lines<BufReader<ChildStdout>>>>,
    logger: Arc<dyn Logger>,
}

impl StdioTransport {
    /// Launch `executable` with `args`.
    ///
    /// The executable is resolved against the current PATH plus common
    /// install directories, and the child inherits that augmented PATH.
    pub fn spawn(
        executable: &str,
        args: &[String],
        logger: Arc<dyn Logger>,
    ) -> Result<Self, TransportError> {
        if executable.trim().is_empty() {
            return Err(TransportError::InvalidCommand(
                "empty command line".to_string(),
            ));
        }

        let search_path = build_effective_path(None);
        let resolved = resolve_executable(executable, &search_path).map_err(|reason| {
            TransportError::LaunchFailed {
                command: executable.to_string(),
                reason,
            }
        })?;
        let child_path = build_effective_path(resolved.parent());

        let mut command = Command::new(&resolved);
        command
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .env("PATH", &child_path)
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| TransportError::LaunchFailed {
            command: executable.to_string(),
            reason: format!("{e} (resolved to {})", resolved.display()),
        })?;

        let stdin = child.stdin.take().ok_or_else(|| TransportError::LaunchFailed {
            command: executable.to_string(),
            reason: "stdin not captured".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| TransportError::LaunchFailed {
            command: executable.to_string(),
            reason: "stdout not captured".to_string(),
        })?;

        logger.debug(&format!(
            "Launched '{}' (pid {:?}) with {} argument(s)",
            resolved.display(),
            child.id(),
            args.len()
        ));

        Ok(Self {
            command: executable.to_string(),
            child: Mutex::new(Some(child)),
            stdin: Mutex::new(Some(stdin)),
            stdout: Mutex::new(Some(BufReader::new(stdout).lines())),
            logger,
        })
    }

    /// Executable name as configured.
    pub fn command(&self) -> &str {
        &self.command
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn send(&self, message: &Value) -> Result<(), TransportError> {
        let mut line = serde_json::to_string(message)?;
        line.push('\n');

        let mut guard = self.stdin.lock().await;
        let stdin = guard.as_mut().ok_or(TransportError::Closed)?;
        stdin.write_all(line.as_bytes()).await?;
        stdin.flush().await?;
        Ok(())
    }

    async fn receive(&self) -> Result<Option<Value>, TransportError> {
        let mut guard = self.stdout.lock().await;
        let Some(lines) = guard.as_mut() else {
            return Ok(None);
        };

        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) if value.is_object() || value.is_array() => return Ok(Some(value)),
                _ => self.logger.debug(&format!(
                    "Skipping non-JSON output from '{}': {trimmed}",
                    self.command
                )),
            }
        }
        Ok(None)
    }

    async fn close(&self) -> Result<(), TransportError> {
        // Closing stdin is the polite shutdown signal.
        if let Some(mut stdin) = self.stdin.lock().await.take() {
            let _ = stdin.shutdown().await;
        }

        if let Some(mut child) = self.child.lock().await.take() {
            match tokio::time::timeout(EXIT_GRACE, child.wait()).await {
                Ok(Ok(status)) => self
                    .logger
                    .debug(&format!("'{}' exited with {status}", self.command)),
                _ => {
                    if let Err(e) = child.kill().await {
                        self.logger
                            .debug(&format!("Failed to kill '{}': {e}", self.command));
                    }
                }
            }
        }

        self.stdout.lock().await.take();
        Ok(())
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Stdio
    }
}
