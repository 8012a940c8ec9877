//! Control binary lookup.

use std::path::{Path, PathBuf};

use crate::error::{CommandErrorKind, SvError};

/// Resolve the control binary.
///
/// A value containing a path separator is taken as a path and must exist;
/// a bare name is searched for on `PATH`.
pub fn resolve_binary(name: &str) -> Result<PathBuf, SvError> {
    let not_found = || SvError::Command {
        kind: CommandErrorKind::BinaryNotFound {
            name: binary_label(name),
        },
    };

    if name.contains('/') {
        let path = Path::new(name);
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(not_found())
        };
    }

    find_on_path(name).ok_or_else(not_found)
}

/// Search the directories listed in `PATH` for an executable file.
pub fn find_on_path(binary: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(binary))
        .find(|candidate| is_executable(candidate))
}

fn binary_label(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string())
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
