//! Error types for the service reconciler.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the reconciler and its module boundary.
#[derive(Error, Debug)]
pub enum SvError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors.
    #[error("Validation error: {kind}")]
    Validation { kind: ValidationErrorKind },

    /// Contradictory desired enabled/state combination.
    #[error("{message}")]
    Conflict { message: String },

    /// Command execution errors (symlink mutation or control command).
    #[error("{kind}")]
    Command { kind: CommandErrorKind },

    /// The status command printed something other than `run:` or `down:`.
    #[error("Invalid status. Will not proceed. (got '{status}')")]
    InvalidStatus { status: String },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Validation error kinds.
#[derive(Error, Debug)]
pub enum ValidationErrorKind {
    #[error("Invalid service name '{name}': {reason}")]
    InvalidServiceName { name: String, reason: String },

    #[error("Service definition not found: {path}")]
    UnknownService { path: PathBuf },

    #[error("Missing required parameter: {param}")]
    MissingParameter { param: String },

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },
}

/// Command error kinds.
#[derive(Error, Debug)]
pub enum CommandErrorKind {
    #[error("Cannot find {name} binary in path.")]
    BinaryNotFound { name: String },

    #[error("{message}")]
    ExecutionFailed { message: String },

    #[error("Command timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
}

impl SvError {
    /// Shorthand for a conflicting enabled/state request.
    pub fn conflict() -> Self {
        SvError::Conflict {
            message: "Conflicting request. Will not proceed.".to_string(),
        }
    }

    /// Shorthand for an execution failure carrying the underlying error text.
    pub fn execution(message: impl Into<String>) -> Self {
        SvError::Command {
            kind: CommandErrorKind::ExecutionFailed {
                message: message.into(),
            },
        }
    }

    /// Stable machine-readable code reported to the caller.
    pub fn code(&self) -> &'static str {
        match self {
            SvError::Config { .. } => "CONFIG_ERROR",
            SvError::Validation { .. } => "VALIDATION_ERROR",
            SvError::Conflict { .. } => "CONFLICT",
            SvError::Command { kind } => match kind {
                CommandErrorKind::BinaryNotFound { .. } => "BINARY_NOT_FOUND",
                CommandErrorKind::ExecutionFailed { .. } => "EXECUTION_FAILED",
                CommandErrorKind::Timeout { .. } => "TIMEOUT",
            },
            SvError::InvalidStatus { .. } => "INVALID_STATUS",
            SvError::Io(_) => "IO_ERROR",
            SvError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_keeps_message_verbatim() {
        let err = SvError::execution("fail: nginx: unable to change to service directory");
        assert_eq!(
            err.to_string(),
            "fail: nginx: unable to change to service directory"
        );
        assert_eq!(err.code(), "EXECUTION_FAILED");
    }

    #[test]
    fn test_conflict_message() {
        let err = SvError::conflict();
        assert_eq!(err.to_string(), "Conflicting request. Will not proceed.");
        assert_eq!(err.code(), "CONFLICT");
    }

    #[test]
    fn test_codes() {
        let err = SvError::Command {
            kind: CommandErrorKind::BinaryNotFound {
                name: "sv".to_string(),
            },
        };
        assert_eq!(err.code(), "BINARY_NOT_FOUND");
        assert_eq!(err.to_string(), "Cannot find sv binary in path.");

        let err = SvError::InvalidStatus {
            status: "warning".to_string(),
        };
        assert_eq!(err.code(), "INVALID_STATUS");
    }
}
