//! Command executor module.
//!
//! Handles subprocess spawning, timeouts, and locating the control binary.

mod resolve;
mod subprocess;

pub use resolve::{find_on_path, resolve_binary};
pub use subprocess::{SubprocessBuilder, SubprocessResult};
