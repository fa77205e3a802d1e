use crate::error::ToolchainError;
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run a command to completion, killing it if it runs longer than `timeout`.
///
/// The child inherits stdout and stderr, so tool diagnostics appear in the console.
/// A timeout too large to be represented as a deadline waits for the tool indefinitely.
pub fn run_with_timeout(mut command: Command, timeout: Duration) -> Result<(), ToolchainError> {
    let tool = command.get_program().to_string_lossy().into_owned();
    tracing::debug!(command = ?command, "running {tool}");

    let mut child = command
        .spawn()
        .map_err(|e| ToolchainError::SpawnError(tool.clone(), e))?;

    let deadline = Instant::now().checked_add(timeout);
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() => return Ok(()),
            Ok(Some(status)) => return Err(ToolchainError::ToolFailed { tool, status }),
            Ok(None) => {}
            Err(e) => return Err(ToolchainError::WaitError(tool, e)),
        }

        let Some(deadline) = deadline else {
            thread::sleep(POLL_INTERVAL);
            continue;
        };

        let now = Instant::now();
        if now >= deadline {
            if let Err(e) = child.kill() {
                tracing::warn!("could not kill `{tool}`: {e}");
            }
            if let Err(e) = child.wait() {
                tracing::warn!("could not reap `{tool}`: {e}");
            }
            return Err(ToolchainError::ExternalToolTimeout { tool, timeout });
        }

        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}
