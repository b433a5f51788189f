//! Extension build orchestration
//!
//! Pairs a descriptor with the build step that suits the installed helper.
//! The helper is probed once; the driver then branches on the answer:
//!
//! - componentized helper: the full configuration becomes the descriptor and
//!   the standard step runs; the install is already limited to the component.
//! - full-install helper: `component` is dropped from the configuration and
//!   the cleanup step runs, pruning the install root to the same contents.

use super::descriptor::ExtensionDescriptor;
use super::helper::BuildHelper;
use super::layout::BuildLayout;
use super::step::{BuildError, BuildStep, step_for};
use super::types::{BuildCapability, BuildReport, BuildStepKind};
use crate::config::ExtensionConfig;

/// Extension builder coordinator
///
/// High-level interface for building one extension. Owns the helper and
/// hands out [`PreparedBuild`]s.
#[derive(Debug)]
pub struct ExtensionBuilder<H> {
    helper: H,
    layout: BuildLayout,
}

impl<H: BuildHelper> ExtensionBuilder<H> {
    /// Create a new extension builder.
    #[must_use]
    pub const fn new(helper: H, layout: BuildLayout) -> Self {
        Self { helper, layout }
    }

    /// The helper in use
    #[must_use]
    pub const fn helper(&self) -> &H {
        &self.helper
    }

    /// The directory layout in use
    #[must_use]
    pub const fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// Probe the helper and construct the descriptor/step pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the probe fails, or if the descriptor cannot be
    /// constructed even in the shape the helper supports.
    pub fn prepare(&self, config: &ExtensionConfig) -> Result<PreparedBuild, BuildError> {
        let capability = self.helper.probe()?;
        prepare_for(capability, config)
    }

    /// Prepare and run the build in one go.
    ///
    /// # Errors
    ///
    /// Returns an error if preparation, the native build or the cleanup fails.
    pub fn build(&self, config: &ExtensionConfig) -> Result<BuildReport, BuildError> {
        self.prepare(config)?.run(&self.helper, &self.layout)
    }
}

/// Construct the descriptor/step pair for a known capability.
///
/// # Errors
///
/// Returns an error if the descriptor cannot be constructed in the shape the
/// capability allows. That second construction is not retried.
pub fn prepare_for(
    capability: BuildCapability,
    config: &ExtensionConfig,
) -> Result<PreparedBuild, BuildError> {
    let descriptor = match capability {
        BuildCapability::Componentized => ExtensionDescriptor::new(config, capability)?,
        BuildCapability::FullInstall => {
            ExtensionDescriptor::new(&config.without_component(), capability)?
        }
    };

    // No component means a full install either way, so the tree needs pruning
    let kind = if descriptor.component().is_some() {
        crate::info!("Using standard CMake extension");
        BuildStepKind::Standard
    } else {
        crate::info!("Using custom CMake extension ({capability})");
        BuildStepKind::Cleanup
    };

    Ok(PreparedBuild {
        capability,
        descriptor,
        step: step_for(kind),
    })
}

/// A descriptor paired with the step that will build it
///
/// Running consumes the value: each prepared build runs, and cleans up, once.
#[derive(Debug)]
pub struct PreparedBuild {
    capability: BuildCapability,
    descriptor: ExtensionDescriptor,
    step: Box<dyn BuildStep>,
}

impl PreparedBuild {
    /// Capability the pair was prepared for
    #[must_use]
    pub const fn capability(&self) -> BuildCapability {
        self.capability
    }

    /// The descriptor that will be built
    #[must_use]
    pub const fn descriptor(&self) -> &ExtensionDescriptor {
        &self.descriptor
    }

    /// Which step implementation was selected
    #[must_use]
    pub fn step_kind(&self) -> BuildStepKind {
        self.step.kind()
    }

    /// Run the selected step.
    ///
    /// # Errors
    ///
    /// Returns an error if the native build or the cleanup fails.
    pub fn run(
        self,
        helper: &dyn BuildHelper,
        layout: &BuildLayout,
    ) -> Result<BuildReport, BuildError> {
        self.step.run(helper, &self.descriptor, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::DescriptorError;
    use crate::test_utils::fixtures::FakeHelper;
    use tempfile::TempDir;

    #[test]
    fn componentized_helper_keeps_full_descriptor() {
        let config = ExtensionConfig::default();

        let prepared = prepare_for(BuildCapability::Componentized, &config).unwrap();

        assert_eq!(prepared.descriptor().component(), Some("python"));
        assert_eq!(
            prepared.descriptor().configure_options(),
            config.configure_options
        );
        assert_eq!(prepared.step_kind(), BuildStepKind::Standard);
    }

    #[test]
    fn full_install_helper_drops_component_and_prunes() {
        let config = ExtensionConfig::default();

        let prepared = prepare_for(BuildCapability::FullInstall, &config).unwrap();

        let expected =
            ExtensionDescriptor::new(&config.without_component(), BuildCapability::FullInstall)
                .unwrap();
        assert_eq!(prepared.descriptor(), &expected);
        assert_eq!(prepared.step_kind(), BuildStepKind::Cleanup);
        assert_eq!(prepared.capability(), BuildCapability::FullInstall);
    }

    #[test]
    fn config_without_component_prunes_on_any_helper() {
        let config = ExtensionConfig::default().without_component();

        let prepared = prepare_for(BuildCapability::Componentized, &config).unwrap();

        assert_eq!(prepared.step_kind(), BuildStepKind::Cleanup);
    }

    #[test]
    fn fallback_construction_failure_propagates() {
        let config = ExtensionConfig {
            name: "ryml..ryml".to_string(),
            ..ExtensionConfig::default()
        };

        let err = prepare_for(BuildCapability::FullInstall, &config).unwrap_err();

        assert!(matches!(
            err,
            BuildError::Descriptor(DescriptorError::InvalidName { .. })
        ));
    }

    #[test]
    fn componentized_build_does_not_prune() {
        let dir = TempDir::new().unwrap();
        let builder = ExtensionBuilder::new(FakeHelper::componentized(), BuildLayout::under(dir.path()));

        let report = builder.build(&ExtensionConfig::default()).unwrap();

        assert_eq!(report.step, BuildStepKind::Standard);
        assert!(report.removed.is_empty());
        assert!(report.install_root.join("ryml.so").exists());
        assert!(!report.install_root.join("lib").exists());
    }

    #[test]
    fn full_install_build_prunes_to_component_equivalent() {
        let dir = TempDir::new().unwrap();
        let builder = ExtensionBuilder::new(
            FakeHelper::full_install(&["lib", "include", "cmake"]),
            BuildLayout::under(dir.path()),
        );

        let report = builder.build(&ExtensionConfig::default()).unwrap();

        assert_eq!(report.step, BuildStepKind::Cleanup);
        assert_eq!(report.removed.len(), 3);
        assert!(report.install_root.join("ryml.so").exists());
        assert_eq!(builder.helper().builds(), 1);
        assert_eq!(
            report.install_root,
            builder.layout().build_lib().join("ryml")
        );
    }

    #[test]
    fn helper_failure_aborts_build() {
        let dir = TempDir::new().unwrap();
        let builder = ExtensionBuilder::new(FakeHelper::failing(), BuildLayout::under(dir.path()));

        let err = builder.build(&ExtensionConfig::default()).unwrap_err();

        assert!(matches!(err, BuildError::Helper(_)));
    }
}
