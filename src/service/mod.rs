//! Service enablement on the filesystem.
//!
//! A service is enabled when `<service-root>/<name>` is a symlink to its
//! definition directory `<config-root>/<name>`.

mod links;
mod umask;

pub use links::ServiceLinks;
pub use umask::UmaskGuard;
