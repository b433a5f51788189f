//! Build steps
//!
//! A build step takes a descriptor through the helper. There are two: the
//! standard step only delegates, the cleanup step delegates and then prunes
//! what a full install leaves behind. The driver picks one per build.

use super::cleanup::{CleanupError, prune_install_tree};
use super::descriptor::{DescriptorError, ExtensionDescriptor};
use super::helper::{BuildHelper, HelperError};
use super::layout::BuildLayout;
use super::types::{BuildReport, BuildStepKind};
use std::fmt;
use std::time::Instant;
use thiserror::Error;

/// Anything that aborts an extension build
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to describe extension: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Helper(#[from] HelperError),

    #[error("post-install cleanup failed: {0}")]
    Cleanup(#[from] CleanupError),
}

/// One way of running the helper for a descriptor
pub trait BuildStep: fmt::Debug {
    /// Which implementation this is
    fn kind(&self) -> BuildStepKind;

    /// Build `descriptor` with `helper`.
    ///
    /// # Errors
    ///
    /// Returns an error if the helper fails or the step's own post-processing
    /// fails.
    fn run(
        &self,
        helper: &dyn BuildHelper,
        descriptor: &ExtensionDescriptor,
        layout: &BuildLayout,
    ) -> Result<BuildReport, BuildError>;
}

/// Plain delegation to the helper
///
/// Used when the helper installs only the requested component, so the
/// install root already has the right contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBuildStep;

impl BuildStep for StandardBuildStep {
    fn kind(&self) -> BuildStepKind {
        BuildStepKind::Standard
    }

    fn run(
        &self,
        helper: &dyn BuildHelper,
        descriptor: &ExtensionDescriptor,
        layout: &BuildLayout,
    ) -> Result<BuildReport, BuildError> {
        let start_time = Instant::now();
        helper.build(descriptor, layout)?;

        Ok(BuildReport::standard(
            descriptor.name().to_string(),
            layout.install_root(descriptor),
            start_time.elapsed(),
        ))
    }
}

/// Delegation followed by pruning of the install root
///
/// Used when the helper can only do a full install; removing `lib`,
/// `include` and `cmake` leaves the same tree a component install would.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupBuildStep;

impl BuildStep for CleanupBuildStep {
    fn kind(&self) -> BuildStepKind {
        BuildStepKind::Cleanup
    }

    fn run(
        &self,
        helper: &dyn BuildHelper,
        descriptor: &ExtensionDescriptor,
        layout: &BuildLayout,
    ) -> Result<BuildReport, BuildError> {
        let start_time = Instant::now();
        helper.build(descriptor, layout)?;

        let install_root = layout.install_root(descriptor);
        let removed = prune_install_tree(&install_root)?;

        Ok(BuildReport::cleaned(
            descriptor.name().to_string(),
            install_root,
            removed,
            start_time.elapsed(),
        ))
    }
}

/// Step implementation for a given kind
#[must_use]
pub fn step_for(kind: BuildStepKind) -> Box<dyn BuildStep> {
    match kind {
        BuildStepKind::Standard => Box::new(StandardBuildStep),
        BuildStepKind::Cleanup => Box::new(CleanupBuildStep),
    }
}
