//! Path utilities for locating tools and configuration files.

use crate::env_vars;
use std::path::{Path, PathBuf};

/// Local configuration file name, looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = ".ryml-build.toml";

/// Find an executable named `name` on `PATH`.
///
/// Returns the first regular file found. On Windows the `.exe` suffix is
/// tried as well.
#[must_use]
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let search_path = env_vars::path()?;
    find_executable_in(name, std::env::split_paths(&search_path))
}

/// Find an executable named `name` in the given directories, in order.
#[must_use]
pub fn find_executable_in(
    name: &str,
    search_dirs: impl IntoIterator<Item = PathBuf>,
) -> Option<PathBuf> {
    search_dirs.into_iter().find_map(|dir| {
        executable_candidates(&dir, name)
            .into_iter()
            .find(|candidate| candidate.is_file())
    })
}

fn executable_candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut candidates = vec![dir.join(name)];
    if cfg!(windows) {
        candidates.push(dir.join(format!("{name}.exe")));
    }
    candidates
}

/// Get the user configuration directory for ryml-build.
/// Priority: `$XDG_CONFIG_HOME/ryml-build` -> `~/.config/ryml-build`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    if let Some(xdg_config) = env_vars::xdg_config_home() {
        return Some(PathBuf::from(xdg_config).join("ryml-build"));
    }

    dirs::home_dir().map(|home| home.join(".config").join("ryml-build"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_executable_in_first_matching_dir() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(second.path().join("cmake"), "").unwrap();

        let found = find_executable_in(
            "cmake",
            [first.path().to_path_buf(), second.path().to_path_buf()],
        );

        assert_eq!(found, Some(second.path().join("cmake")));
    }

    #[test]
    fn skips_directories_with_matching_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("cmake")).unwrap();

        let found = find_executable_in("cmake", [dir.path().to_path_buf()]);

        assert!(found.is_none());
    }

    #[test]
    fn missing_executable() {
        let dir = TempDir::new().unwrap();
        assert!(find_executable_in("cmake", [dir.path().to_path_buf()]).is_none());
    }
}
