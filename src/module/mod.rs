//! Module boundary.
//!
//! Turns module arguments into a reconciliation and the outcome into the
//! result document printed for the calling orchestration tool.

mod params;
mod response;

use tracing::{error, info_span};
use uuid::Uuid;

use crate::config::Settings;
use crate::error::SvError;
use crate::executor::resolve_binary;
use crate::reconcile::{ReconcileResult, Reconciler};
use crate::service::ServiceLinks;
use crate::supervisor::SvControl;

pub use params::ModuleParams;
pub use response::ModuleResponse;

/// Metadata about one module invocation.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Unique identifier for this invocation, attached to every log line.
    pub request_id: Uuid,
    /// Report changes without making them.
    pub dry_run: bool,
}

impl ExecutionContext {
    pub fn new(dry_run: bool) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            dry_run,
        }
    }
}

/// Run the module against the real `sv` binary and filesystem layout.
pub fn run(settings: &Settings, params: &ModuleParams) -> ModuleResponse {
    let ctx = ExecutionContext::new(params.check_mode());
    let span = info_span!("runsv_state", request_id = %ctx.request_id);
    let _enter = span.enter();

    match execute(settings, params, &ctx) {
        Ok(result) => ModuleResponse::from_result(&result),
        Err(e) => {
            error!(error = %e, code = e.code(), "Reconciliation failed");
            ModuleResponse::failure(&e)
        }
    }
}

fn execute(
    settings: &Settings,
    params: &ModuleParams,
    ctx: &ExecutionContext,
) -> Result<ReconcileResult, SvError> {
    // Conflicts are reported before anything else is looked at.
    let desired = params.to_request()?.normalize()?;

    let binary = resolve_binary(&settings.control.binary)?;
    let control = SvControl::new(binary, settings.control.timeout());
    let links = ServiceLinks::from_config(&settings.paths);

    Reconciler::new(links, control)
        .dry_run(ctx.dry_run)
        .reconcile(&desired)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_reported_before_binary_lookup() {
        let mut settings = Settings::default();
        settings.control.binary = "definitely-not-a-real-sv-12345".to_string();

        let params = ModuleParams::new(serde_json::json!({
            "name": "nginx",
            "state": "started",
            "enabled": false,
        }));

        let response = run(&settings, &params);
        assert!(response.failed);
        assert_eq!(response.error_code.as_deref(), Some("CONFLICT"));
        assert_eq!(response.msg, "Conflicting request. Will not proceed.");
    }

    #[test]
    fn test_missing_binary() {
        let mut settings = Settings::default();
        settings.control.binary = "definitely-not-a-real-sv-12345".to_string();

        let params = ModuleParams::new(serde_json::json!({
            "name": "nginx",
            "state": "started",
        }));

        let response = run(&settings, &params);
        assert!(response.failed);
        assert_eq!(response.error_code.as_deref(), Some("BINARY_NOT_FOUND"));
    }

    #[test]
    fn test_context_ids_are_unique() {
        let a = ExecutionContext::new(false);
        let b = ExecutionContext::new(true);
        assert_ne!(a.request_id, b.request_id);
        assert!(b.dry_run);
    }
}
