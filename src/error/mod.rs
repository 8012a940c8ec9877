//! Error types for the service reconciler.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
