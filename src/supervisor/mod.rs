//! Supervision suite control.
//!
//! The reconciler talks to the supervisor only through [`ServiceControl`],
//! so tests can substitute a fake for the real `sv` binary.

mod status;
mod sv;
mod traits;
mod types;

pub use status::parse_status;
pub use sv::SvControl;
pub use traits::ServiceControl;
pub use types::{ControlCommand, RunState};
