//! Project and toolchain detection
//!
//! Checks the source tree for a `CMake` project and reads the installed
//! `CMake` version, which is what decides the helper capability.

use super::types::BuildCapability;
use semver::Version;
use std::path::{Path, PathBuf};

/// First `CMake` release with `cmake --install --component`
pub const COMPONENT_INSTALL_SINCE: Version = Version::new(3, 15, 0);

/// Find the `CMakeLists.txt` at the top of `source_dir`
#[must_use]
pub fn detect_cmake_project(source_dir: &Path) -> Option<PathBuf> {
    let cmake_lists = source_dir.join("CMakeLists.txt");
    cmake_lists.is_file().then_some(cmake_lists)
}

/// Parse the output of `cmake --version`
///
/// Accepts release, release-candidate and nightly formats:
/// - `cmake version 3.28.1`
/// - `cmake version 3.31.0-rc2`
/// - `cmake3 version 3.17.5`
/// - `cmake version 3.29.20240416-g3e9d8b6`
///
/// Pre-release and build suffixes are dropped.
#[must_use]
pub fn parse_cmake_version(output: &str) -> Option<Version> {
    let token = output.lines().find_map(|line| {
        let mut words = line.split_whitespace();
        words.position(|word| word == "version")?;
        words.next()
    })?;

    let core = token.split(['-', '+']).next()?;
    let mut parts = core.split('.').map(str::parse::<u64>);

    let major = parts.next()?.ok()?;
    let minor = parts.next().and_then(Result::ok).unwrap_or(0);
    let patch = parts.next().and_then(Result::ok).unwrap_or(0);

    Some(Version::new(major, minor, patch))
}

/// Capability of a `CMake` installation of the given version
#[must_use]
pub fn capability_for_version(version: &Version) -> BuildCapability {
    if *version >= COMPONENT_INSTALL_SINCE {
        BuildCapability::Componentized
    } else {
        BuildCapability::FullInstall
    }
}
