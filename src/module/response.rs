//! Result document returned to the caller.

use serde::Serialize;

use crate::error::SvError;
use crate::reconcile::ReconcileResult;
use crate::supervisor::RunState;

/// The JSON object printed on stdout.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<RunState>,
    pub msg: String,
    #[serde(skip_serializing_if = "is_false")]
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ModuleResponse {
    pub fn from_result(result: &ReconcileResult) -> Self {
        Self {
            name: Some(result.name.clone()),
            changed: result.changed,
            enable: Some(result.enabled),
            state: Some(result.state),
            msg: result.message.clone(),
            failed: false,
            error_code: None,
        }
    }

    pub fn failure(error: &SvError) -> Self {
        Self {
            name: None,
            changed: false,
            enable: None,
            state: None,
            msg: error.to_string(),
            failed: true,
            error_code: Some(error.code().to_string()),
        }
    }
}
