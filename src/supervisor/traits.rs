//! Control capability trait.

use crate::error::SvError;

use super::types::{ControlCommand, RunState};

/// Inspects and changes the run state of a supervised service.
///
/// Implementations are only asked about services that are currently
/// enabled; the reconciler answers [`RunState::Disabled`] itself.
pub trait ServiceControl {
    /// Current run state, [`RunState::Up`] or [`RunState::Down`].
    fn status(&self, name: &str) -> Result<RunState, SvError>;

    /// Issue a control command. A failed command is an error carrying the
    /// command's error output.
    fn control(&self, name: &str, command: ControlCommand) -> Result<(), SvError>;
}

impl<T: ServiceControl + ?Sized> ServiceControl for &T {
    fn status(&self, name: &str) -> Result<RunState, SvError> {
        (**self).status(name)
    }

    fn control(&self, name: &str, command: ControlCommand) -> Result<(), SvError> {
        (**self).control(name, command)
    }
}
