//! Configuration settings for the service reconciler.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SvError;

/// Default location of the optional configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/runsv-state/config.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub control: ControlConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Filesystem layout of the supervision suite.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Directory holding one service definition directory per service.
    #[serde(default = "default_config_root")]
    pub config_root: PathBuf,
    /// Directory whose symlinks mark services as enabled.
    #[serde(default = "default_service_root")]
    pub service_root: PathBuf,
}

/// Control binary configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlConfig {
    /// Name or path of the control executable.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Timeout for each control invocation, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_config_root() -> PathBuf {
    PathBuf::from("/etc/sv")
}

fn default_service_root() -> PathBuf {
    PathBuf::from("/var/service")
}

fn default_binary() -> String {
    "sv".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_root: default_config_root(),
            service_root: default_service_root(),
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ControlConfig {
    /// Timeout applied to each control binary invocation.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SvError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SvError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            SvError::Config { message } => SvError::Config {
                message: format!("{} ({})", message, path.display()),
            },
            other => other,
        })
    }

    /// Load settings from an explicit path, or fall back to the default path
    /// when it exists, or to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SvError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SvError> {
        let settings: Settings = toml::from_str(content).map_err(|e| SvError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate the settings.
    fn validate(&self) -> Result<(), SvError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(SvError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(SvError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        if self.control.binary.trim().is_empty() {
            return Err(SvError::Config {
                message: "Control binary cannot be empty".to_string(),
            });
        }

        if self.control.timeout_seconds == 0 {
            return Err(SvError::Config {
                message: "Control timeout must be at least one second".to_string(),
            });
        }

        Ok(())
    }
}
