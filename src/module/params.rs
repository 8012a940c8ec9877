//! Module arguments.

use std::path::Path;

use crate::error::{SvError, ValidationErrorKind};
use crate::reconcile::{DesiredState, ServiceRequest};

/// Key the orchestration tool sets when running in check mode.
const CHECK_MODE_KEY: &str = "_ansible_check_mode";

/// Wrapper around the JSON module arguments with typed accessors.
#[derive(Debug, Clone)]
pub struct ModuleParams {
    inner: serde_json::Value,
}

impl ModuleParams {
    /// Create parameters from a JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self { inner: value }
    }

    /// Parameters with no arguments set.
    pub fn empty() -> Self {
        Self::new(serde_json::Value::Object(serde_json::Map::new()))
    }

    /// Read parameters from a JSON args file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SvError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        if !value.is_object() {
            return Err(SvError::Validation {
                kind: ValidationErrorKind::InvalidParameter {
                    param: "args".to_string(),
                    message: "module arguments must be a JSON object".to_string(),
                },
            });
        }
        Ok(Self::new(value))
    }

    /// Set or replace an argument.
    pub fn set(&mut self, key: &str, value: serde_json::Value) {
        if !self.inner.is_object() {
            self.inner = serde_json::Value::Object(serde_json::Map::new());
        }
        if let Some(map) = self.inner.as_object_mut() {
            map.insert(key.to_string(), value);
        }
    }

    /// Get an optional string parameter. `null` counts as absent.
    pub fn get_optional_string(&self, key: &str) -> Option<String> {
        self.inner.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
    }

    /// Get an optional boolean, accepting the orchestration tool's boolean
    /// spellings (`yes`/`no`, `on`/`off`, `1`/`0`, ...).
    pub fn get_optional_bool(&self, key: &str) -> Result<Option<bool>, SvError> {
        let invalid = |shown: String| SvError::Validation {
            kind: ValidationErrorKind::InvalidParameter {
                param: key.to_string(),
                message: format!("'{}' is not a valid boolean", shown),
            },
        };

        match self.inner.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Bool(b)) => Ok(Some(*b)),
            Some(serde_json::Value::Number(n)) => match n.as_i64() {
                Some(1) => Ok(Some(true)),
                Some(0) => Ok(Some(false)),
                _ => Err(invalid(n.to_string())),
            },
            Some(serde_json::Value::String(s)) => parse_bool(s).map(Some).ok_or_else(|| invalid(s.clone())),
            Some(other) => Err(invalid(other.to_string())),
        }
    }

    /// Service name, from `name` or its alias `service`.
    pub fn name(&self) -> Result<String, SvError> {
        self.get_optional_string("name")
            .or_else(|| self.get_optional_string("service"))
            .ok_or_else(|| SvError::Validation {
                kind: ValidationErrorKind::MissingParameter {
                    param: "name".to_string(),
                },
            })
    }

    /// Whether the caller asked for a dry run.
    pub fn check_mode(&self) -> bool {
        self.inner
            .get(CHECK_MODE_KEY)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Build the service request these arguments describe.
    pub fn to_request(&self) -> Result<ServiceRequest, SvError> {
        let state = self
            .get_optional_string("state")
            .map(|s| s.parse::<DesiredState>())
            .transpose()?;

        Ok(ServiceRequest {
            name: self.name()?,
            state,
            enabled: self.get_optional_bool("enabled")?,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "on" | "true" | "t" | "1" => Some(true),
        "no" | "n" | "off" | "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_request() {
        let params = ModuleParams::new(json!({
            "name": "nginx",
            "state": "restarted",
            "enabled": "yes",
        }));

        let request = params.to_request().unwrap();
        assert_eq!(request.name, "nginx");
        assert_eq!(request.state, Some(DesiredState::Restarted));
        assert_eq!(request.enabled, Some(true));
    }

    #[test]
    fn test_service_alias() {
        let params = ModuleParams::new(json!({"service": "sshd", "enabled": false}));
        assert_eq!(params.name().unwrap(), "sshd");
    }

    #[test]
    fn test_missing_name() {
        let params = ModuleParams::new(json!({"state": "started"}));
        assert!(matches!(
            params.to_request(),
            Err(SvError::Validation {
                kind: ValidationErrorKind::MissingParameter { .. }
            })
        ));
    }

    #[test]
    fn test_boolean_spellings() {
        for (raw, expected) in [
            (json!(true), Some(true)),
            (json!("no"), Some(false)),
            (json!("On"), Some(true)),
            (json!(0), Some(false)),
            (json!(null), None),
        ] {
            let params = ModuleParams::new(json!({ "enabled": raw }));
            assert_eq!(params.get_optional_bool("enabled").unwrap(), expected);
        }

        let params = ModuleParams::new(json!({"enabled": "maybe"}));
        assert!(params.get_optional_bool("enabled").is_err());
    }

    #[test]
    fn test_invalid_state() {
        let params = ModuleParams::new(json!({"name": "nginx", "state": "running"}));
        assert!(params.to_request().is_err());
    }

    #[test]
    fn test_check_mode() {
        assert!(!ModuleParams::empty().check_mode());

        let mut params = ModuleParams::new(json!({"name": "nginx"}));
        params.set(CHECK_MODE_KEY, json!(true));
        assert!(params.check_mode());
    }

    #[test]
    fn test_set_overrides_file_value() {
        let mut params = ModuleParams::new(json!({"name": "nginx", "state": "started"}));
        params.set("state", json!("stopped"));
        assert_eq!(params.get_optional_string("state").as_deref(), Some("stopped"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("args");
        std::fs::write(&path, r#"{"name": "nginx", "_ansible_check_mode": true}"#).unwrap();

        let params = ModuleParams::from_file(&path).unwrap();
        assert!(params.check_mode());

        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(ModuleParams::from_file(&path).is_err());
    }
}
