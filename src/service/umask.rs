//! Scoped file-creation mask override.

use nix::sys::stat::{umask, Mode};
use tracing::trace;

/// Sets the process umask and restores the previous value when dropped.
///
/// The umask is process-wide; hold the guard only around a single
/// reconciliation.
#[must_use = "the previous umask is restored when the guard is dropped"]
#[derive(Debug)]
pub struct UmaskGuard {
    previous: Mode,
}

impl UmaskGuard {
    pub fn set(mask: Mode) -> Self {
        let previous = umask(mask);
        trace!(previous = previous.bits(), mask = mask.bits(), "Set umask");
        Self { previous }
    }

    /// Clear the umask entirely (mask 0).
    pub fn clear() -> Self {
        Self::set(Mode::empty())
    }

    pub fn previous(&self) -> Mode {
        self.previous
    }
}

impl Drop for UmaskGuard {
    fn drop(&mut self) {
        umask(self.previous);
        trace!(restored = self.previous.bits(), "Restored umask");
    }
}
