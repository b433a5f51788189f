//! Build environment variable handling.

use std::env;

// Toolchain location

/// Get the `CMake` executable override (`CMAKE`).
pub fn cmake() -> Option<String> {
    non_empty("CMAKE")
}

/// Get the interpreter driving the build.
///
/// `PYTHON_SYS_EXECUTABLE` is what build frontends export; `PYTHON` is the
/// conventional fallback.
pub fn python_executable() -> Option<String> {
    non_empty("PYTHON_SYS_EXECUTABLE").or_else(|| non_empty("PYTHON"))
}

// Build behavior overrides

/// Get the forced helper capability (`RYML_BUILD_CAPABILITY`: auto, component, full).
pub fn capability() -> Option<String> {
    non_empty("RYML_BUILD_CAPABILITY")
}

/// Get number of parallel build jobs.
///
/// Checks `RYML_BUILD_JOBS` then `CMAKE_BUILD_PARALLEL_LEVEL`; returns None if
/// neither is set or parses.
pub fn build_jobs() -> Option<usize> {
    non_empty("RYML_BUILD_JOBS")
        .or_else(|| non_empty("CMAKE_BUILD_PARALLEL_LEVEL"))
        .and_then(|s| s.trim().parse().ok())
}

/// Get the `CMake` build type override (`CMAKE_BUILD_TYPE`).
pub fn build_type() -> Option<String> {
    non_empty("CMAKE_BUILD_TYPE")
}

/// Get the `CMake` generator override (`CMAKE_GENERATOR`).
pub fn generator() -> Option<String> {
    non_empty("CMAKE_GENERATOR")
}

// Compiler toolchain - forwarded to the configure step as cache entries

/// Get C compiler (`CC`).
pub fn cc() -> Option<String> {
    non_empty("CC")
}

/// Get C++ compiler (`CXX`).
pub fn cxx() -> Option<String> {
    non_empty("CXX")
}

/// Get C compiler flags (`CFLAGS`).
pub fn cflags() -> Option<String> {
    non_empty("CFLAGS")
}

/// Get C++ compiler flags (`CXXFLAGS`).
pub fn cxxflags() -> Option<String> {
    non_empty("CXXFLAGS")
}

/// Get linker flags (`LDFLAGS`).
pub fn ldflags() -> Option<String> {
    non_empty("LDFLAGS")
}

// Configuration lookup

/// Get the XDG config home (`XDG_CONFIG_HOME`).
pub fn xdg_config_home() -> Option<String> {
    non_empty("XDG_CONFIG_HOME")
}

/// Get the `PATH` search list.
pub fn path() -> Option<String> {
    non_empty("PATH")
}

// Empty values count as unset, matching how CMake treats them
fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|s| !s.trim().is_empty())
}
