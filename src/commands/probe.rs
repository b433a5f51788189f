//! Probe command
//!
//! Report which descriptor shape the installed `CMake` supports.

use anyhow::{Context, Result};
use ryml_build::extensions::capability_for_version;
use ryml_build::{CMakeHelper, Config};

/// Print the `CMake` path, version and capability
pub(crate) fn run(config: Config) -> Result<()> {
    let pinned = config.cmake.capability.pinned();
    let helper = CMakeHelper::new(config.cmake).context("Failed to locate CMake")?;

    // One `cmake --version` serves both the report and the capability
    let (version, capability) = match (helper.version(), pinned) {
        (Ok(version), pinned) => {
            let capability = pinned.unwrap_or_else(|| capability_for_version(&version));
            (version.to_string(), capability)
        }
        (Err(e), Some(capability)) => (format!("unknown ({e})"), capability),
        (Err(e), None) => return Err(e).context("Failed to probe CMake"),
    };

    println!("cmake:      {}", helper.cmake_path().display());
    println!("version:    {version}");
    println!(
        "capability: {capability}{}",
        if pinned.is_some() { " (pinned)" } else { "" }
    );
    println!(
        "build step: {}",
        if capability.supports_component() {
            "standard"
        } else {
            "custom (prunes lib/, include/, cmake/ after install)"
        }
    );
    Ok(())
}
