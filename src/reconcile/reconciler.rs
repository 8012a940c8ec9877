//! The reconciler.

use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::SvError;
use crate::service::{ServiceLinks, UmaskGuard};
use crate::supervisor::{RunState, ServiceControl};
use crate::validation::validate_service_definition;

use super::request::{DesiredService, ServiceRequest};
use super::types::{Action, ReconcileResult};

/// Pause after creating an enablement link, giving `runsvdir` time to
/// notice the new service before its status is read.
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Outcome of a single sub-step.
#[derive(Debug, Clone, Copy)]
struct Step {
    changed: bool,
    message: &'static str,
}

impl Step {
    fn unchanged(message: &'static str) -> Self {
        Self {
            changed: false,
            message,
        }
    }

    fn changed(message: &'static str) -> Self {
        Self {
            changed: true,
            message,
        }
    }
}

/// Brings one service to its desired enablement and run state.
///
/// Current state is read from the filesystem and the supervisor on every
/// call. Nothing is cached between calls, and a failure part way through is
/// not rolled back. Concurrent reconciliations of the same service are not
/// serialized.
pub struct Reconciler<C> {
    links: ServiceLinks,
    control: C,
    dry_run: bool,
}

impl<C: ServiceControl> Reconciler<C> {
    pub fn new(links: ServiceLinks, control: C) -> Self {
        Self {
            links,
            control,
            dry_run: false,
        }
    }

    /// Report what would change without touching the link or issuing
    /// control commands.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Normalize a caller request and reconcile it.
    pub fn apply(&self, request: ServiceRequest) -> Result<ReconcileResult, SvError> {
        let desired = request.normalize()?;
        self.reconcile(&desired)
    }

    /// Current run state; `Disabled` without asking the supervisor when the
    /// service is not enabled.
    pub fn run_state(&self, name: &str) -> Result<RunState, SvError> {
        if !self.links.is_enabled(name) {
            return Ok(RunState::Disabled);
        }
        self.control.status(name)
    }

    /// Reconcile a normalized desired state.
    pub fn reconcile(&self, desired: &DesiredService) -> Result<ReconcileResult, SvError> {
        let name = desired.name.as_str();

        info!(
            service = %name,
            enabled = desired.enabled,
            state = ?desired.state.map(|s| s.as_str()),
            dry_run = self.dry_run,
            "Reconciling service"
        );

        let _umask = UmaskGuard::clear();
        let mut steps = Vec::with_capacity(2);

        if desired.enabled {
            let step = self.enable(name)?;
            let transitioned = step.changed && !self.dry_run;
            steps.push(step);

            if transitioned {
                debug!(service = %name, delay_ms = SETTLE_DELAY.as_millis(), "Waiting for supervisor");
                thread::sleep(SETTLE_DELAY);
            }

            if let Some(state) = desired.state {
                let current = self.run_state(name)?;
                steps.push(self.change(name, state.action(), current)?);
            }
        } else {
            if self.is_supervised(name) {
                let current = self.control.status(name)?;
                steps.push(self.change(name, Action::Stop, current)?);
            } else if self.links.is_enabled(name) {
                debug!(service = %name, "Definition missing, nothing to stop");
            }
            steps.push(self.disable(name)?);
        }

        let enabled = self.links.is_enabled(name);
        let state = if self.is_supervised(name) {
            self.control.status(name)?
        } else {
            RunState::Down
        };

        let result = ReconcileResult {
            name: name.to_string(),
            changed: steps.iter().any(|s| s.changed),
            enabled,
            state,
            message: steps
                .iter()
                .map(|s| s.message)
                .filter(|m| !m.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        };

        info!(
            service = %name,
            changed = result.changed,
            enabled = result.enabled,
            state = %result.state,
            "Reconciled service"
        );

        Ok(result)
    }

    /// Enabled with a definition behind the link. A dangling link has no
    /// supervisor `sv` could query.
    fn is_supervised(&self, name: &str) -> bool {
        self.links.is_enabled(name) && self.links.definition_path(name).is_dir()
    }

    fn enable(&self, name: &str) -> Result<Step, SvError> {
        if self.links.is_enabled(name) {
            return Ok(Step::unchanged("Already enabled."));
        }

        validate_service_definition(self.links.config_root(), name)?;

        if self.dry_run {
            debug!(service = %name, "Would enable");
            return Ok(Step::changed("Would be enabled."));
        }

        self.links.enable(name)?;
        Ok(Step::changed("Enabled."))
    }

    fn disable(&self, name: &str) -> Result<Step, SvError> {
        if !self.links.is_enabled(name) {
            return Ok(Step::unchanged("Already disabled."));
        }

        if self.dry_run {
            debug!(service = %name, "Would disable");
            return Ok(Step::changed("Would be disabled."));
        }

        self.links.disable(name)?;
        Ok(Step::changed("Disabled."))
    }

    fn change(&self, name: &str, action: Action, current: RunState) -> Result<Step, SvError> {
        if !action.needs_change(current) {
            return Ok(Step::unchanged("Nothing to do."));
        }

        if self.dry_run {
            debug!(service = %name, action = ?action, current = %current, "Would change run state");
            return Ok(Step::changed("Would be changed."));
        }

        let command = action.command(current);
        debug!(service = %name, command = %command, current = %current, "Changing run state");
        self.control.control(name, command)?;
        Ok(Step::changed(command.done_message()))
    }
}
