//! runit service state reconciler.
//!
//! Brings a runit service to a desired enablement and run state. Enablement
//! is the `<service-root>/<name>` symlink, and run state is read and changed
//! through the `sv` control binary.

pub mod config;
pub mod error;
pub mod executor;
pub mod module;
pub mod reconcile;
pub mod service;
pub mod supervisor;
pub mod validation;
