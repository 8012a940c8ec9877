//! The umask is process-wide, so the guard is checked in its own test binary
//! with a single test function.

use nix::sys::stat::{umask, Mode};

use runsv_state::service::UmaskGuard;

fn current() -> Mode {
    let mask = umask(Mode::empty());
    umask(mask);
    mask
}

#[test]
fn test_umask_guard_restores_on_every_exit_path() {
    umask(Mode::from_bits_truncate(0o022));

    {
        let guard = UmaskGuard::clear();
        assert_eq!(guard.previous(), Mode::from_bits_truncate(0o022));
        assert_eq!(current(), Mode::empty());
    }
    assert_eq!(current(), Mode::from_bits_truncate(0o022));

    let result = std::panic::catch_unwind(|| {
        let _guard = UmaskGuard::set(Mode::from_bits_truncate(0o077));
        panic!("reconciliation failed");
    });
    assert!(result.is_err());
    assert_eq!(current(), Mode::from_bits_truncate(0o022));
}
