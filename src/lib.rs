//! ryml-build internal library code

pub mod config;
pub mod debug;
pub mod env_vars;
pub mod extensions;
pub mod interpreter;
pub mod paths;
pub mod test_utils;

// Re-export common types for convenience
pub use config::{CMakeSettings, Config, ExtensionConfig};
pub use debug::{Verbosity, init_verbosity, is_debug_enabled};
pub use extensions::{
    BuildCapability, BuildError, BuildHelper, BuildLayout, BuildReport, BuildStepKind,
    CMakeHelper, ExtensionBuilder, ExtensionDescriptor, PreparedBuild,
};
pub use interpreter::resolve_interpreter;
