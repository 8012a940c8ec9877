//! Subprocess execution.
//!
//! Runs external commands with:
//! - No shell interpretation (direct exec)
//! - A timeout enforced by polling, with kill and reap on expiry
//! - Captured stdout/stderr

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{CommandErrorKind, SvError};

/// Result of a subprocess execution.
#[derive(Debug, Clone)]
pub struct SubprocessResult {
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
    /// The exit code, if available.
    pub exit_code: Option<i32>,
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
}

impl SubprocessResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Builder for subprocess execution.
pub struct SubprocessBuilder {
    program: OsString,
    args: Vec<String>,
    timeout: Duration,
}

impl SubprocessBuilder {
    /// Create a new subprocess builder.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().as_os_str().to_owned(),
            args: Vec::new(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Add arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args.extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Set the timeout for the command.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute the command and wait for completion with timeout enforcement.
    ///
    /// If the process exceeds the configured timeout, it is killed and a
    /// timeout error is returned. A non-zero exit is not an error here; the
    /// caller inspects [`SubprocessResult::success`].
    pub fn run(self) -> Result<SubprocessResult, SvError> {
        let program = self.program.to_string_lossy().to_string();
        debug!(
            program = %program,
            args = ?self.args,
            timeout_secs = self.timeout.as_secs(),
            "Executing subprocess"
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| SvError::execution(format!("Failed to spawn {}: {}", program, e)))?;

        let start = Instant::now();
        let poll_interval = Duration::from_millis(50);

        loop {
            match child.try_wait() {
                Ok(Some(_status)) => {
                    let output = child.wait_with_output().map_err(|e| {
                        SvError::execution(format!("Failed to get output from {}: {}", program, e))
                    })?;
                    let result = SubprocessResult::from_output(output);
                    debug!(
                        success = result.success,
                        exit_code = ?result.exit_code,
                        duration_ms = start.elapsed().as_millis(),
                        "Subprocess completed"
                    );
                    return Ok(result);
                }
                Ok(None) => {
                    if start.elapsed() > self.timeout {
                        warn!(
                            program = %program,
                            timeout_secs = self.timeout.as_secs(),
                            "Process timed out, killing"
                        );
                        if let Err(e) = child.kill() {
                            warn!(error = %e, "Failed to kill timed-out process");
                        }
                        let _ = child.wait();
                        return Err(SvError::Command {
                            kind: CommandErrorKind::Timeout {
                                timeout_secs: self.timeout.as_secs(),
                            },
                        });
                    }
                    std::thread::sleep(poll_interval);
                }
                Err(e) => {
                    return Err(SvError::execution(format!(
                        "Failed to check process status: {}",
                        e
                    )));
                }
            }
        }
    }
}
