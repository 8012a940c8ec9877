//! `sv`-backed service control.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::SvError;
use crate::executor::{SubprocessBuilder, SubprocessResult};

use super::status::parse_status;
use super::traits::ServiceControl;
use super::types::{ControlCommand, RunState};

/// Controls services through the runit `sv` binary.
#[derive(Debug, Clone)]
pub struct SvControl {
    binary: PathBuf,
    timeout: Duration,
}

impl SvControl {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    fn run(&self, subcommand: &str, name: &str) -> Result<SubprocessResult, SvError> {
        SubprocessBuilder::new(&self.binary)
            .args([subcommand, name])
            .timeout(self.timeout)
            .run()
    }
}

impl ServiceControl for SvControl {
    fn status(&self, name: &str) -> Result<RunState, SvError> {
        let result = self.run("status", name)?;

        // sv reports failures on stdout, e.g. "fail: foo: unable to change to service directory"
        if !result.success {
            warn!(service = %name, stdout = %result.stdout, "sv status failed");
            return Err(SvError::execution(result.stdout.trim_end()));
        }

        let state = parse_status(&result.stdout)?;
        debug!(service = %name, state = %state, "Service status");
        Ok(state)
    }

    fn control(&self, name: &str, command: ControlCommand) -> Result<(), SvError> {
        let result = self.run(command.as_arg(), name)?;

        if !result.success {
            warn!(
                service = %name,
                command = %command,
                stderr = %result.stderr,
                "sv command failed"
            );
            return Err(SvError::execution(result.stderr.trim_end()));
        }

        info!(service = %name, command = %command, "sv command succeeded");
        Ok(())
    }
}
