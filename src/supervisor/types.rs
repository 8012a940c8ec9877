//! Run state and control command types.

use std::fmt;

use serde::Serialize;

/// Observed run state of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// The supervised process is running.
    Up,
    /// The service is supervised but its process is not running.
    Down,
    /// The service is not enabled, so it has no supervisor.
    Disabled,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Up
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunState::Up => "up",
            RunState::Down => "down",
            RunState::Disabled => "disabled",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subcommand passed to the control binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Start,
    Stop,
    Restart,
    /// Send the reload signal (SIGHUP) to the supervised process.
    Hup,
}

impl ControlCommand {
    /// Argument understood by `sv`.
    pub fn as_arg(self) -> &'static str {
        match self {
            ControlCommand::Start => "start",
            ControlCommand::Stop => "stop",
            ControlCommand::Restart => "restart",
            ControlCommand::Hup => "hup",
        }
    }

    /// Message reported after the command succeeded.
    pub fn done_message(self) -> &'static str {
        match self {
            ControlCommand::Start => "Started.",
            ControlCommand::Stop => "Stopped.",
            ControlCommand::Restart => "Restarted.",
            ControlCommand::Hup => "Reloaded.",
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}
