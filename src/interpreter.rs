//! Python interpreter discovery
//!
//! The native build must compile against the same interpreter that drives the
//! packaging, otherwise `CMake` may find a different Python on the system and
//! build against mismatched headers.

use crate::{env_vars, paths};
use anyhow::{Result, bail};
use std::path::PathBuf;

/// Resolve the interpreter to forward into the configure step.
///
/// Priority order:
/// 1. Explicit path (`--python`)
/// 2. `PYTHON_SYS_EXECUTABLE`, then `PYTHON`
/// 3. `python3`, then `python`, on `PATH`
///
/// # Errors
///
/// Returns an error if no interpreter can be found.
pub fn resolve_interpreter(explicit: Option<PathBuf>) -> Result<PathBuf> {
    resolve_with(explicit, env_vars::python_executable(), paths::find_executable)
}

fn resolve_with(
    explicit: Option<PathBuf>,
    from_env: Option<String>,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    if let Some(path) = from_env {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = ["python3", "python"].into_iter().find_map(lookup) {
        return Ok(path);
    }

    bail!(
        "Python interpreter not found. Pass --python or set PYTHON_SYS_EXECUTABLE to the interpreter running the build."
    )
}
