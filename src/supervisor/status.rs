//! Parsing of `sv status` output.

use crate::error::SvError;

use super::types::RunState;

/// Parse the output of `sv status <name>`.
///
/// Only the token before the first `:` matters: `run` is up, `down` is
/// down. `sv` prints `warning:` or `fail:` for supervisors it cannot reach,
/// which are rejected rather than guessed at.
pub fn parse_status(stdout: &str) -> Result<RunState, SvError> {
    let token = stdout.split(':').next().unwrap_or_default();
    match token {
        "run" => Ok(RunState::Up),
        "down" => Ok(RunState::Down),
        other => Err(SvError::InvalidStatus {
            status: other.to_string(),
        }),
    }
}
