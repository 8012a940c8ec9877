//! Service state reconciliation.
//!
//! Normalizes a requested enabled flag and run state, compares them with
//! the state read from the filesystem and the supervisor, and applies the
//! minimal correction.

mod reconciler;
mod request;
mod types;

pub use reconciler::{Reconciler, SETTLE_DELAY};
pub use request::{DesiredService, ServiceRequest};
pub use types::{Action, DesiredState, ReconcileResult};
