//! Post-install cleanup
//!
//! A full (non-componentized) install puts down the native library, its
//! headers and its `CMake` package files next to the Python module. None of
//! those belong in the packaged module, so they are removed right after the
//! install step.
//!
//! On any failure the installed tree is listed before the error is returned.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Whether a subtree must be present after a full install
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Missing means the install did not really happen
    Mandatory,
    /// Only produced on some platforms
    Optional,
}

/// A subtree of the install root that is removed after a full install
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrunedSubtree {
    /// Directory name relative to the install root
    pub name: &'static str,
    /// Presence policy
    pub presence: Presence,
}

/// Subtrees removed from the install root, in removal order
pub const PRUNED_SUBTREES: [PrunedSubtree; 3] = [
    PrunedSubtree {
        name: "lib",
        presence: Presence::Mandatory,
    },
    PrunedSubtree {
        name: "include",
        presence: Presence::Mandatory,
    },
    // Windows only
    PrunedSubtree {
        name: "cmake",
        presence: Presence::Optional,
    },
];

/// Cleanup failures
///
/// Every variant means the build must abort; none is retried.
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("install root does not exist after build: {}", .path.display())]
    MissingInstallRoot { path: PathBuf },

    #[error("expected installed directory is missing: {}", .path.display())]
    MissingMandatory { path: PathBuf },

    #[error("failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Remove [`PRUNED_SUBTREES`] from `install_root`.
///
/// Returns the removed paths in removal order. The policy is the same on
/// every call: a tree that was already pruned fails on the missing `lib`.
///
/// # Errors
///
/// Returns an error if the install root or a mandatory subtree is missing,
/// or a removal fails. For the latter two the installed tree is logged first.
pub fn prune_install_tree(install_root: &Path) -> Result<Vec<PathBuf>, CleanupError> {
    if !install_root.is_dir() {
        return Err(CleanupError::MissingInstallRoot {
            path: install_root.to_path_buf(),
        });
    }

    let mut removed = Vec::with_capacity(PRUNED_SUBTREES.len());
    for subtree in &PRUNED_SUBTREES {
        match remove_subtree(install_root, subtree) {
            Ok(Some(path)) => removed.push(path),
            Ok(None) => {}
            Err(err) => {
                log_installed_files(install_root);
                return Err(err);
            }
        }
    }

    Ok(removed)
}

fn remove_subtree(
    install_root: &Path,
    subtree: &PrunedSubtree,
) -> Result<Option<PathBuf>, CleanupError> {
    let path = install_root.join(subtree.name);

    if !path.exists() {
        return match subtree.presence {
            Presence::Mandatory => Err(CleanupError::MissingMandatory { path }),
            Presence::Optional => {
                crate::debug!("Nothing to remove at {}", path.display());
                Ok(None)
            }
        };
    }

    crate::info!("Removing everything under: {}", path.display());
    fs::remove_dir_all(&path).map_err(|source| CleanupError::Remove {
        path: path.clone(),
        source,
    })?;

    Ok(Some(path))
}

/// Every entry below `install_root`, depth-first, sorted by name
///
/// Entries that cannot be read are reported inline instead of aborting the
/// walk; this is diagnostic output for a build that is already failing.
#[must_use]
pub fn installed_files(install_root: &Path) -> Vec<String> {
    WalkDir::new(install_root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| match entry {
            Ok(entry) => entry.path().display().to_string(),
            Err(err) => format!("<unreadable: {err}>"),
        })
        .collect()
}

fn log_installed_files(install_root: &Path) {
    crate::warn!("Found following installed files:");
    for file in installed_files(install_root) {
        crate::warn!(" - {file}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install_tree(dirs: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        for dir in dirs {
            let path = root.path().join(dir);
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join("placeholder"), "").unwrap();
        }
        fs::write(root.path().join("ryml.py"), "").unwrap();
        root
    }

    #[test]
    fn removes_lib_include_and_cmake() {
        let root = install_tree(&["lib", "include/c4/yml", "cmake"]);

        let removed = prune_install_tree(root.path()).unwrap();

        assert_eq!(
            removed,
            [
                root.path().join("lib"),
                root.path().join("include"),
                root.path().join("cmake")
            ]
        );
        assert!(!root.path().join("lib").exists());
        assert!(!root.path().join("include").exists());
        assert!(!root.path().join("cmake").exists());
        assert!(root.path().join("ryml.py").exists());
    }

    #[test]
    fn missing_cmake_dir_is_not_an_error() {
        let root = install_tree(&["lib", "include"]);

        let removed = prune_install_tree(root.path()).unwrap();

        assert_eq!(removed.len(), 2);
        assert!(!root.path().join("lib").exists());
        assert!(!root.path().join("include").exists());
    }

    #[test]
    fn missing_lib_fails_and_touches_nothing_else() {
        let root = install_tree(&["include", "cmake"]);

        let err = prune_install_tree(root.path()).unwrap_err();

        assert!(
            matches!(&err, CleanupError::MissingMandatory { path } if *path == root.path().join("lib")),
            "unexpected error: {err}"
        );
        assert!(root.path().join("include").exists());
        assert!(root.path().join("cmake").exists());
    }

    #[test]
    fn missing_include_fails_after_lib_removed() {
        let root = install_tree(&["lib"]);

        let err = prune_install_tree(root.path()).unwrap_err();

        assert!(err.to_string().contains("include"));
        assert!(!root.path().join("lib").exists());
    }

    #[test]
    fn missing_install_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("ryml");

        let err = prune_install_tree(&root).unwrap_err();

        assert!(matches!(err, CleanupError::MissingInstallRoot { .. }));
    }

    #[test]
    fn second_prune_of_same_tree_fails() {
        let root = install_tree(&["lib", "include"]);

        prune_install_tree(root.path()).unwrap();
        let err = prune_install_tree(root.path()).unwrap_err();

        assert!(matches!(err, CleanupError::MissingMandatory { .. }));
    }

    #[test]
    fn lists_installed_files_sorted() {
        let root = install_tree(&["lib", "include"]);

        let files = installed_files(root.path());

        assert_eq!(
            files,
            [
                root.path().join("include").display().to_string(),
                root.path()
                    .join("include")
                    .join("placeholder")
                    .display()
                    .to_string(),
                root.path().join("lib").display().to_string(),
                root.path()
                    .join("lib")
                    .join("placeholder")
                    .display()
                    .to_string(),
                root.path().join("ryml.py").display().to_string(),
            ]
        );
    }
}
