//! Caller request and its normalization.

use crate::error::{SvError, ValidationErrorKind};
use crate::validation::validate_service_name;

use super::types::DesiredState;

/// Desired state as supplied by the caller; either field may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub name: String,
    pub state: Option<DesiredState>,
    pub enabled: Option<bool>,
}

/// A request with the implied enabled flag and run state filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredService {
    pub name: String,
    pub enabled: bool,
    /// `None` only for an enabled service whose run state is left alone.
    pub state: Option<DesiredState>,
}

impl ServiceRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: None,
            enabled: None,
        }
    }

    pub fn state(mut self, state: DesiredState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Fill in implied values and reject contradictions.
    ///
    /// `started`, `restarted` and `reloaded` imply enabled; disabled implies
    /// `stopped`, and `stopped` without an explicit flag means disabled.
    pub fn normalize(self) -> Result<DesiredService, SvError> {
        validate_service_name(&self.name)?;

        let (enabled, state) = match self.state {
            None => match self.enabled {
                None => {
                    return Err(SvError::Validation {
                        kind: ValidationErrorKind::MissingParameter {
                            param: "state or enabled".to_string(),
                        },
                    })
                }
                Some(true) => (true, None),
                Some(false) => (false, Some(DesiredState::Stopped)),
            },
            Some(DesiredState::Stopped) => {
                (self.enabled.unwrap_or(false), Some(DesiredState::Stopped))
            }
            Some(state) => {
                if self.enabled == Some(false) {
                    return Err(SvError::conflict());
                }
                (true, Some(state))
            }
        };

        Ok(DesiredService {
            name: self.name,
            enabled,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_started_implies_enabled() {
        let desired = ServiceRequest::new("nginx")
            .state(DesiredState::Started)
            .normalize()
            .unwrap();
        assert!(desired.enabled);
        assert_eq!(desired.state, Some(DesiredState::Started));
    }

    #[test]
    fn test_disabled_implies_stopped() {
        let desired = ServiceRequest::new("nginx").enabled(false).normalize().unwrap();
        assert!(!desired.enabled);
        assert_eq!(desired.state, Some(DesiredState::Stopped));
    }

    #[test]
    fn test_stopped_alone_disables() {
        let desired = ServiceRequest::new("nginx")
            .state(DesiredState::Stopped)
            .normalize()
            .unwrap();
        assert!(!desired.enabled);
    }

    #[test]
    fn test_enabled_but_stopped() {
        let desired = ServiceRequest::new("nginx")
            .state(DesiredState::Stopped)
            .enabled(true)
            .normalize()
            .unwrap();
        assert!(desired.enabled);
        assert_eq!(desired.state, Some(DesiredState::Stopped));
    }

    #[test]
    fn test_enabled_only_leaves_run_state() {
        let desired = ServiceRequest::new("nginx").enabled(true).normalize().unwrap();
        assert!(desired.enabled);
        assert_eq!(desired.state, None);
    }

    #[test]
    fn test_conflicts() {
        for state in [
            DesiredState::Started,
            DesiredState::Restarted,
            DesiredState::Reloaded,
        ] {
            let result = ServiceRequest::new("nginx").state(state).enabled(false).normalize();
            assert!(matches!(result, Err(SvError::Conflict { .. })), "{}", state);
        }
    }

    #[test]
    fn test_neither_supplied() {
        let result = ServiceRequest::new("nginx").normalize();
        assert!(matches!(
            result,
            Err(SvError::Validation {
                kind: ValidationErrorKind::MissingParameter { .. }
            })
        ));
    }

    #[test]
    fn test_invalid_name() {
        let result = ServiceRequest::new("../nginx").enabled(true).normalize();
        assert!(matches!(result, Err(SvError::Validation { .. })));
    }
}
