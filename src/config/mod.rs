//! Configuration module for the service reconciler.
//!
//! Handles loading and validating configuration from TOML files.

mod settings;

pub use settings::*;
