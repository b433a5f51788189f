//! Native extension building
//!
//! Builds the compiled Python module through `CMake` and shapes the install
//! output into what the package ships.
//!
//! Pieces:
//! - descriptors (`descriptor`) and where they build (`layout`)
//! - the helper seam (`helper`) and its `CMake` implementation (`cmake_extension`)
//! - build steps (`step`) and install pruning (`cleanup`)
//! - the driver that pairs them per helper capability (`builder`)

pub mod builder;
pub mod cleanup;
pub mod cmake_extension;
pub mod descriptor;
pub mod detector;
pub mod helper;
pub mod layout;
pub mod step;
pub mod types;

pub use builder::{ExtensionBuilder, PreparedBuild, prepare_for};
pub use cleanup::{CleanupError, PRUNED_SUBTREES, installed_files, prune_install_tree};
pub use cmake_extension::CMakeHelper;
pub use descriptor::{DescriptorError, ExtensionDescriptor};
pub use detector::{capability_for_version, detect_cmake_project, parse_cmake_version};
pub use helper::{BuildHelper, HelperError};
pub use layout::BuildLayout;
pub use step::{BuildError, BuildStep, CleanupBuildStep, StandardBuildStep};
pub use types::{BuildCapability, BuildReport, BuildStepKind, CapabilityOverride};
