//! Service name validation.
//!
//! A service name becomes a single path component under both the
//! configuration root and the service root, and an argument to the control
//! binary, so it must not be able to escape either directory.

use std::path::Path;

use crate::error::{SvError, ValidationErrorKind};

/// Longest name accepted; matches the usual filesystem component limit.
const MAX_SERVICE_NAME_LEN: usize = 255;

fn invalid(name: &str, reason: &str) -> SvError {
    SvError::Validation {
        kind: ValidationErrorKind::InvalidServiceName {
            name: name.to_string(),
            reason: reason.to_string(),
        },
    }
}

/// Validate that a service name is a safe single path component.
///
/// # Example
///
/// ```
/// use runsv_state::validation::validate_service_name;
///
/// assert!(validate_service_name("nginx").is_ok());
/// assert!(validate_service_name("../etc/passwd").is_err());
/// ```
pub fn validate_service_name(name: &str) -> Result<(), SvError> {
    if name.is_empty() {
        return Err(SvError::Validation {
            kind: ValidationErrorKind::InvalidParameter {
                param: "name".to_string(),
                message: "Service name cannot be empty".to_string(),
            },
        });
    }

    if name.len() > MAX_SERVICE_NAME_LEN {
        return Err(invalid(name, "name is too long"));
    }

    if name == "." || name == ".." {
        return Err(invalid(name, "name cannot be a relative directory"));
    }

    if name.starts_with('-') {
        return Err(invalid(name, "name cannot start with '-'"));
    }

    if let Some(c) = name
        .chars()
        .find(|c| *c == '/' || *c == '\0' || c.is_whitespace() || c.is_control())
    {
        return Err(invalid(name, &format!("name contains forbidden character {:?}", c)));
    }

    Ok(())
}

/// Validate that the service definition directory exists under `config_root`.
pub fn validate_service_definition(config_root: &Path, name: &str) -> Result<(), SvError> {
    let path = config_root.join(name);
    if !path.is_dir() {
        return Err(SvError::Validation {
            kind: ValidationErrorKind::UnknownService { path },
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_service_name("nginx").is_ok());
        assert!(validate_service_name("agetty-tty1").is_ok());
        assert!(validate_service_name("php-fpm8.3").is_ok());
        assert!(validate_service_name("socklog-unix").is_ok());
    }

    #[test]
    fn test_empty_service_name() {
        let result = validate_service_name("");
        assert!(matches!(
            result,
            Err(SvError::Validation {
                kind: ValidationErrorKind::InvalidParameter { .. }
            })
        ));
    }

    #[test]
    fn test_path_injection_attempts() {
        assert!(validate_service_name("..").is_err());
        assert!(validate_service_name(".").is_err());
        assert!(validate_service_name("../etc/passwd").is_err());
        assert!(validate_service_name("nginx/../../root").is_err());
        assert!(validate_service_name("nginx; rm -rf /").is_err());
        assert!(validate_service_name("nginx\nmalicious").is_err());
    }

    #[test]
    fn test_option_like_names() {
        assert!(matches!(
            validate_service_name("-v"),
            Err(SvError::Validation {
                kind: ValidationErrorKind::InvalidServiceName { .. }
            })
        ));
    }

    #[test]
    fn test_too_long() {
        let name = "a".repeat(MAX_SERVICE_NAME_LEN + 1);
        assert!(validate_service_name(&name).is_err());
    }

    #[test]
    fn test_service_definition() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sshd")).unwrap();

        assert!(validate_service_definition(dir.path(), "sshd").is_ok());
        assert!(matches!(
            validate_service_definition(dir.path(), "ntpd"),
            Err(SvError::Validation {
                kind: ValidationErrorKind::UnknownService { .. }
            })
        ));
    }
}
