//! Build helper seam
//!
//! The helper is the machinery that actually configures, compiles and
//! installs a descriptor. It comes in two shapes (see [`BuildCapability`]);
//! everything above this trait works with either.

use super::descriptor::ExtensionDescriptor;
use super::layout::BuildLayout;
use super::types::BuildCapability;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a build helper
#[derive(Debug, Error)]
pub enum HelperError {
    #[error("CMake executable not found. Install CMake from https://cmake.org")]
    ToolNotFound,

    #[error("No CMakeLists.txt found in {}", .dir.display())]
    MissingProject { dir: PathBuf },

    #[error("Failed to execute {step}: {source}")]
    Spawn {
        step: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} failed ({status})\n{output}")]
    CommandFailed {
        step: &'static str,
        status: String,
        output: String,
    },

    #[error("Unrecognized CMake version output: {output}")]
    UnknownVersion { output: String },

    #[error("Failed to prepare {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configure/compile/install machinery for extension descriptors
pub trait BuildHelper: std::fmt::Debug {
    /// Determine which descriptor shape this helper supports.
    ///
    /// Called once per build, before any descriptor is constructed.
    ///
    /// # Errors
    ///
    /// Returns an error if the helper cannot be queried at all.
    fn probe(&self) -> Result<BuildCapability, HelperError>;

    /// Configure, compile and install `descriptor` into its install root.
    ///
    /// # Errors
    ///
    /// Returns an error if any stage of the native build fails.
    fn build(
        &self,
        descriptor: &ExtensionDescriptor,
        layout: &BuildLayout,
    ) -> Result<(), HelperError>;
}
