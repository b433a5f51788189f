//! Extension build type definitions
//!
//! The build helper comes in two shapes: one that can restrict the install
//! step to a named component, and an older one that always installs
//! everything. These types describe which shape is present and which build
//! step was chosen to cope with it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// What the installed build helper can do
///
/// Determined once per run by probing the helper, then passed by value
/// wherever a decision depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildCapability {
    /// Descriptor accepts `component`; install is limited to that component
    Componentized,

    /// Descriptor rejects `component`; install always puts down everything
    FullInstall,
}

impl BuildCapability {
    /// Whether descriptors may carry an install component
    #[must_use]
    #[inline]
    pub const fn supports_component(self) -> bool {
        matches!(self, Self::Componentized)
    }

    /// Get a human-readable description
    #[must_use]
    #[inline]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Componentized => "component install",
            Self::FullInstall => "full install",
        }
    }
}

impl fmt::Display for BuildCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// How the helper capability is decided
///
/// `Auto` probes the helper; the other two pin the answer, which is how CI
/// exercises the fallback path on a modern `CMake`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityOverride {
    /// Probe the helper
    #[default]
    Auto,

    /// Treat the helper as componentized
    Component,

    /// Treat the helper as full-install only
    Full,
}

impl CapabilityOverride {
    /// The pinned capability, or `None` when the helper must be probed
    #[must_use]
    pub const fn pinned(self) -> Option<BuildCapability> {
        match self {
            Self::Auto => None,
            Self::Component => Some(BuildCapability::Componentized),
            Self::Full => Some(BuildCapability::FullInstall),
        }
    }
}

impl FromStr for CapabilityOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "component" | "componentized" => Ok(Self::Component),
            "full" | "full-install" => Ok(Self::Full),
            other => Err(format!(
                "unknown capability '{other}' (expected auto, component or full)"
            )),
        }
    }
}

/// Which build step implementation is active for this build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStepKind {
    /// Delegate to the helper and nothing else
    Standard,

    /// Delegate to the helper, then prune the install tree
    Cleanup,
}

impl BuildStepKind {
    /// Label used in log lines
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Cleanup => "custom",
        }
    }
}

impl fmt::Display for BuildStepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a successful build step
#[derive(Debug)]
pub struct BuildReport {
    /// Qualified extension name
    pub extension: String,

    /// Step implementation that ran
    pub step: BuildStepKind,

    /// Install-output root of the extension
    pub install_root: PathBuf,

    /// Subtrees deleted by the cleanup phase (empty for the standard step)
    pub removed: Vec<PathBuf>,

    /// Build duration
    pub duration: Duration,
}

impl BuildReport {
    /// Create a report for a build that did no pruning
    #[must_use]
    pub const fn standard(extension: String, install_root: PathBuf, duration: Duration) -> Self {
        Self {
            extension,
            step: BuildStepKind::Standard,
            install_root,
            removed: Vec::new(),
            duration,
        }
    }

    /// Create a report for a build followed by cleanup
    #[must_use]
    pub const fn cleaned(
        extension: String,
        install_root: PathBuf,
        removed: Vec<PathBuf>,
        duration: Duration,
    ) -> Self {
        Self {
            extension,
            step: BuildStepKind::Cleanup,
            install_root,
            removed,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_component_support() {
        assert!(BuildCapability::Componentized.supports_component());
        assert!(!BuildCapability::FullInstall.supports_component());
    }

    #[test]
    fn parses_capability_override() {
        assert_eq!("auto".parse(), Ok(CapabilityOverride::Auto));
        assert_eq!(" Component ".parse(), Ok(CapabilityOverride::Component));
        assert_eq!("full".parse(), Ok(CapabilityOverride::Full));
        assert!("partial".parse::<CapabilityOverride>().is_err());
    }

    #[test]
    fn pinned_capability() {
        assert_eq!(CapabilityOverride::Auto.pinned(), None);
        assert_eq!(
            CapabilityOverride::Full.pinned(),
            Some(BuildCapability::FullInstall)
        );
    }

    #[test]
    fn step_kind_labels() {
        assert_eq!(BuildStepKind::Standard.to_string(), "standard");
        assert_eq!(BuildStepKind::Cleanup.to_string(), "custom");
    }
}
