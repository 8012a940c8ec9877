//! Desired state, actions, and the reconciliation result.

use std::fmt;
use std::str::FromStr;

use crate::error::{SvError, ValidationErrorKind};
use crate::supervisor::{ControlCommand, RunState};

/// Requested run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredState {
    Started,
    Stopped,
    Restarted,
    Reloaded,
}

impl DesiredState {
    pub fn as_str(self) -> &'static str {
        match self {
            DesiredState::Started => "started",
            DesiredState::Stopped => "stopped",
            DesiredState::Restarted => "restarted",
            DesiredState::Reloaded => "reloaded",
        }
    }

    /// The run-state action that brings a service into this state.
    pub fn action(self) -> Action {
        match self {
            DesiredState::Started => Action::Start,
            DesiredState::Stopped => Action::Stop,
            DesiredState::Restarted => Action::Restart,
            DesiredState::Reloaded => Action::Reload,
        }
    }

    /// Whether the state can only be reached by an enabled service.
    pub fn implies_enabled(self) -> bool {
        !matches!(self, DesiredState::Stopped)
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesiredState {
    type Err = SvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "started" => Ok(DesiredState::Started),
            "stopped" => Ok(DesiredState::Stopped),
            "restarted" => Ok(DesiredState::Restarted),
            "reloaded" => Ok(DesiredState::Reloaded),
            other => Err(SvError::Validation {
                kind: ValidationErrorKind::InvalidParameter {
                    param: "state".to_string(),
                    message: format!(
                        "value '{}' is not one of started, stopped, restarted, reloaded",
                        other
                    ),
                },
            }),
        }
    }
}

/// One-shot run-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Restart,
    Reload,
}

impl Action {
    /// Whether the action changes anything given the current run state.
    ///
    /// Restart always does; start and reload only act on a service that is
    /// not running; stop only on one that is.
    pub fn needs_change(self, current: RunState) -> bool {
        match self {
            Action::Restart => true,
            Action::Start | Action::Reload => !current.is_running(),
            Action::Stop => current.is_running(),
        }
    }

    /// Control command that carries out the action from the current state.
    ///
    /// Reload on a stopped service is a start.
    pub fn command(self, current: RunState) -> ControlCommand {
        match (self, current.is_running()) {
            (Action::Restart, true) => ControlCommand::Restart,
            (Action::Restart, false) | (Action::Start, _) => ControlCommand::Start,
            (Action::Stop, _) => ControlCommand::Stop,
            (Action::Reload, false) => ControlCommand::Start,
            (Action::Reload, true) => ControlCommand::Hup,
        }
    }
}

/// Outcome of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileResult {
    pub name: String,
    pub changed: bool,
    /// Enablement observed after reconciliation.
    pub enabled: bool,
    /// Run state observed after reconciliation; `Down` when not enabled.
    pub state: RunState,
    pub message: String,
}
